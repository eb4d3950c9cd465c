//! History Manager for ticketscope.
//!
//! Implements `HistoryManagerTrait` (recording visits, searching, listing,
//! and clearing browsing history) on top of SQLite via `rusqlite`, and the
//! `HistoryStore` seam the ticket search runs against.

use std::sync::Mutex;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::database::Database;
use crate::types::errors::HistoryError;
use crate::types::history::{HistoryEntry, HistoryQuery};

/// Read side of a browsing history source.
///
/// Implementations answer a `HistoryQuery` with matching entries, newest
/// first, capped at `query.limit()`.
pub trait HistoryStore: Send + Sync {
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, HistoryError>;
}

/// Trait defining history management operations on the local database.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError>;
    fn record_visit_at(&mut self, url: &str, title: &str, visit_time: i64)
        -> Result<String, HistoryError>;
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError>;
    fn clear_all(&mut self) -> Result<(), HistoryError>;
}

/// History manager backed by a SQLite connection.
pub struct HistoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> HistoryManager<'a> {
    /// Creates a new `HistoryManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<HistoryEntry> {
        Ok(HistoryEntry {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            visit_count: row.get(3)?,
            last_visit_time: row.get(4)?,
        })
    }
}

/// Escapes LIKE wildcards so the query text matches literally.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl<'a> HistoryManagerTrait for HistoryManager<'a> {
    /// Records a page visit at the current time. Returns the entry ID.
    fn record_visit(&mut self, url: &str, title: &str) -> Result<String, HistoryError> {
        self.record_visit_at(url, title, chrono::Utc::now().timestamp_millis())
    }

    /// Records a page visit at `visit_time` (epoch ms). If the URL already
    /// exists, increments visit_count, refreshes the title and keeps the
    /// later of the two visit times.
    fn record_visit_at(
        &mut self,
        url: &str,
        title: &str,
        visit_time: i64,
    ) -> Result<String, HistoryError> {
        let existing: Option<String> = match self.conn.query_row(
            "SELECT id FROM history WHERE url = ?1",
            params![url],
            |row| row.get(0),
        ) {
            Ok(id) => Some(id),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(HistoryError::DatabaseError(e.to_string())),
        };

        match existing {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE history SET visit_count = visit_count + 1, \
                         last_visit_time = MAX(last_visit_time, ?1), title = ?2 WHERE id = ?3",
                        params![visit_time, title, id],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
            None => {
                let id = Uuid::new_v4().to_string();
                self.conn
                    .execute(
                        "INSERT INTO history (id, url, title, visit_count, last_visit_time) \
                         VALUES (?1, ?2, ?3, 1, ?4)",
                        params![id, url, title, visit_time],
                    )
                    .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
                Ok(id)
            }
        }
    }

    /// Matches `query.text` against URL or title and applies the time bounds.
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, visit_count, last_visit_time FROM history \
                 WHERE (url LIKE ?1 ESCAPE '\\' OR title LIKE ?1 ESCAPE '\\') \
                 AND (?2 IS NULL OR last_visit_time >= ?2) \
                 AND (?3 IS NULL OR last_visit_time <= ?3) \
                 ORDER BY last_visit_time DESC LIMIT ?4",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(
                params![
                    like_pattern(&query.text),
                    query.start_time,
                    query.end_time,
                    query.limit()
                ],
                Self::row_to_entry,
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Lists every entry, newest first.
    fn list_history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, url, title, visit_count, last_visit_time \
                 FROM history ORDER BY last_visit_time DESC",
            )
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_entry)
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| HistoryError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    /// Deletes a single history entry by ID.
    fn delete_entry(&mut self, id: &str) -> Result<(), HistoryError> {
        let affected = self
            .conn
            .execute("DELETE FROM history WHERE id = ?1", params![id])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(HistoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Clears all history entries.
    fn clear_all(&mut self) -> Result<(), HistoryError> {
        self.conn
            .execute("DELETE FROM history", [])
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

/// Thread-safe history store over the local database.
///
/// `HistoryManager` borrows its connection, so the store owns the
/// `Database` and lends it out per call.
pub struct SqliteHistoryStore {
    db: Mutex<Database>,
}

impl SqliteHistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Runs `f` with a `HistoryManager` over the locked connection.
    pub fn with_manager<T>(
        &self,
        f: impl FnOnce(&mut HistoryManager<'_>) -> Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        let db = self
            .db
            .lock()
            .map_err(|e| HistoryError::DatabaseError(e.to_string()))?;
        let mut manager = HistoryManager::new(db.connection());
        f(&mut manager)
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn search(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.with_manager(|mgr| mgr.search(query))?;
        log::debug!(
            "local history search for {:?} returned {} entries",
            query.text,
            entries.len()
        );
        Ok(entries)
    }
}
