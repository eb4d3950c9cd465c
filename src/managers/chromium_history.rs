//! Read-only history store over a Chromium profile `History` database.
//!
//! The browser keeps the live file locked, so each search copies it to a
//! temporary file and queries the copy. Chromium stores times as
//! microseconds since 1601-01-01 UTC.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::managers::history_manager::{like_pattern, HistoryStore};
use crate::types::errors::HistoryError;
use crate::types::history::{HistoryEntry, HistoryQuery};

/// Milliseconds between 1601-01-01 and 1970-01-01.
const WEBKIT_EPOCH_OFFSET_MS: i64 = 11_644_473_600_000;

/// Converts Unix epoch milliseconds to Chromium's WebKit microseconds.
pub fn unix_ms_to_webkit(unix_ms: i64) -> i64 {
    unix_ms.saturating_add(WEBKIT_EPOCH_OFFSET_MS).saturating_mul(1000)
}

/// Converts Chromium's WebKit microseconds to Unix epoch milliseconds.
pub fn webkit_to_unix_ms(webkit_us: i64) -> i64 {
    webkit_us / 1000 - WEBKIT_EPOCH_OFFSET_MS
}

/// History store reading a Chromium `History` file.
pub struct ChromiumHistoryStore {
    path: PathBuf,
}

impl ChromiumHistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> Result<tempfile::NamedTempFile, HistoryError> {
        if !self.path.exists() {
            return Err(HistoryError::SourceUnavailable(format!(
                "{} does not exist",
                self.path.display()
            )));
        }
        let snapshot = tempfile::Builder::new()
            .prefix("ticketscope-history-")
            .suffix(".db")
            .tempfile()
            .map_err(|e| HistoryError::SourceUnavailable(e.to_string()))?;
        std::fs::copy(&self.path, snapshot.path()).map_err(|e| {
            HistoryError::SourceUnavailable(format!(
                "failed to copy {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(snapshot)
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        let id: i64 = row.get(0)?;
        let title: Option<String> = row.get(2)?;
        let visit_count: i64 = row.get(3)?;
        let webkit_time: i64 = row.get(4)?;
        Ok(HistoryEntry {
            id: id.to_string(),
            url: row.get(1)?,
            title: title.unwrap_or_default(),
            visit_count: u32::try_from(visit_count.max(0)).unwrap_or(u32::MAX),
            last_visit_time: webkit_to_unix_ms(webkit_time),
        })
    }
}

impl HistoryStore for ChromiumHistoryStore {
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, HistoryError> {
        let snapshot = self.snapshot()?;
        let conn = Connection::open_with_flags(snapshot.path(), OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| HistoryError::SourceUnavailable(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, url, title, visit_count, last_visit_time FROM urls \
                 WHERE hidden = 0 \
                 AND (url LIKE ?1 ESCAPE '\\' OR title LIKE ?1 ESCAPE '\\') \
                 AND (?2 IS NULL OR last_visit_time >= ?2) \
                 AND (?3 IS NULL OR last_visit_time <= ?3) \
                 ORDER BY last_visit_time DESC LIMIT ?4",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![
                    like_pattern(&query.text),
                    query.start_time.map(unix_ms_to_webkit),
                    query.end_time.map(unix_ms_to_webkit),
                    query.limit()
                ],
                Self::row_to_entry,
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        log::debug!(
            "chromium history search in {} returned {} entries",
            self.path.display(),
            results.len()
        );
        Ok(results)
    }
}
