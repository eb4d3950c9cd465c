//! Ticket search orchestration.
//!
//! One search is: build the query, ask the history store, filter by phrase,
//! sort, then classify each title. `submit` adds debouncing and makes the
//! most recent request authoritative: anything older that finishes later is
//! reported as `SearchOutcome::Superseded` and its results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::managers::history_manager::HistoryStore;
use crate::services::query_builder::{build, TicketQuery};
use crate::services::result_filter::{filter_entries, sort_entries};
use crate::services::title_classifier::summarize;
use crate::types::errors::{HistoryError, SearchError};
use crate::types::history::HistoryEntry;
use crate::types::settings::{SortOrder, UserSettings, DEFAULT_DEBOUNCE_MS};
use crate::types::ticket::TicketRow;
use crate::types::time_filter::{TimeFilter, WeekStart};

/// Everything needed to run one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub filter: TimeFilter,
    pub phrase: Option<String>,
    pub week_start: WeekStart,
    pub sort: SortOrder,
}

impl SearchRequest {
    /// Request for the saved settings and the current search box text.
    pub fn from_settings(settings: &UserSettings, phrase: Option<&str>) -> Self {
        Self {
            filter: settings.time_filter(),
            phrase: phrase.map(str::to_string),
            week_start: settings.week_start,
            sort: settings.sort,
        }
    }
}

/// Rows produced by a completed search.
#[derive(Debug, Clone)]
pub struct TicketResults {
    pub query: TicketQuery,
    pub rows: Vec<TicketRow>,
}

impl TicketResults {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    Completed(TicketResults),
    /// A newer request was submitted before this one finished.
    Superseded,
}

/// Runs ticket searches against a history store.
#[derive(Clone)]
pub struct TicketSearch {
    store: Arc<dyn HistoryStore>,
    generation: Arc<AtomicU64>,
    debounce: Duration,
}

impl TicketSearch {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            generation: Arc::new(AtomicU64::new(0)),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Runs a search immediately, without debouncing or staleness checks.
    pub fn execute(&self, request: &SearchRequest, now_ms: i64) -> Result<TicketResults, SearchError> {
        let query = build(&request.filter, now_ms, request.week_start)?;
        let entries = self.store.search(&query.query)?;
        Ok(assemble(query, entries, request))
    }

    /// Debounced, last-write-wins search.
    ///
    /// Waits for the debounce delay, then runs the store query on the
    /// blocking pool. Returns `Superseded` if another request was submitted
    /// in the meantime, either during the delay or while the store was busy.
    pub async fn submit(
        &self,
        request: SearchRequest,
        now_ms: i64,
    ) -> Result<SearchOutcome, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if !self.is_latest(generation) {
            log::debug!("search #{} superseded during debounce", generation);
            return Ok(SearchOutcome::Superseded);
        }

        let query = build(&request.filter, now_ms, request.week_start)?;
        let store = Arc::clone(&self.store);
        let history_query = query.query.clone();
        let entries = tokio::task::spawn_blocking(move || store.search(&history_query))
            .await
            .map_err(|e| HistoryError::SourceUnavailable(e.to_string()))??;

        if !self.is_latest(generation) {
            log::debug!("dropping stale response for search #{}", generation);
            return Ok(SearchOutcome::Superseded);
        }
        Ok(SearchOutcome::Completed(assemble(query, entries, &request)))
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

fn assemble(query: TicketQuery, entries: Vec<HistoryEntry>, request: &SearchRequest) -> TicketResults {
    let mut matched = filter_entries(entries, request.phrase.as_deref());
    sort_entries(&mut matched, request.sort);

    let rows = matched
        .into_iter()
        .map(|entry| {
            let ticket = match summarize(&entry) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    log::debug!("not classifying {:?}: {}", entry.title, e);
                    None
                }
            };
            TicketRow { entry, ticket }
        })
        .collect();

    TicketResults { query, rows }
}
