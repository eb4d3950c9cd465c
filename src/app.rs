//! App Core for ticketscope.
//!
//! Holds the history source, the settings engine and the search orchestrator
//! shared by the CLI and the RPC server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::Database;
use crate::managers::history_manager::{HistoryStore, SqliteHistoryStore};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::ticket_search::TicketSearch;

/// Central application struct.
///
/// `local_history` is set only when the history source is the local SQLite
/// database; a Chromium profile is read-only.
pub struct App {
    pub history: Arc<dyn HistoryStore>,
    pub local_history: Option<Arc<SqliteHistoryStore>>,
    pub settings_engine: SettingsEngine,
    pub search: TicketSearch,
}

impl App {
    /// Creates an App over the local history database at `db_path`.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(db_path)?;
        let local = Arc::new(SqliteHistoryStore::new(db));
        let history: Arc<dyn HistoryStore> = local.clone();
        Self::assemble(history, Some(local), settings_path)
    }

    /// Creates an App reading a Chromium profile `History` file.
    #[cfg(feature = "chromium")]
    pub fn with_chromium_history<P: AsRef<Path>>(
        history_path: P,
        settings_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let history_path = history_path.as_ref();
        if !history_path.exists() {
            return Err(format!("Chromium history not found: {}", history_path.display()).into());
        }
        let store = crate::managers::chromium_history::ChromiumHistoryStore::new(history_path);
        Self::assemble(Arc::new(store), None, settings_path)
    }

    /// Creates an App over any history store.
    pub fn with_store(
        history: Arc<dyn HistoryStore>,
        settings_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Self::assemble(history, None, settings_path)
    }

    fn assemble(
        history: Arc<dyn HistoryStore>,
        local_history: Option<Arc<SqliteHistoryStore>>,
        settings_path: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = settings_engine
            .load()
            .map_err(|e| format!("Settings load failed: {}", e))?;

        let search = TicketSearch::new(Arc::clone(&history))
            .with_debounce(Duration::from_millis(settings.debounce_ms));

        log::info!(
            "ticketscope ready (settings at {})",
            settings_engine.get_config_path()
        );

        Ok(Self {
            history,
            local_history,
            settings_engine,
            search,
        })
    }

    /// Default location of the local history database.
    pub fn default_db_path() -> std::path::PathBuf {
        crate::platform::get_data_dir().join("ticketscope.db")
    }

    /// Opens the local database at `path`, creating its directory if needed.
    pub fn open_local(path: &Path, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("database path is not valid UTF-8: {}", path.display()))?;
        Self::new(path_str, settings_path)
    }
}
