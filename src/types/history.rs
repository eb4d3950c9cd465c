use serde::{Deserialize, Serialize};

/// URL substring that identifies a ticket page.
pub const TICKET_PATH_PATTERN: &str = "tickets/ticketdet";

/// Result cap a history store applies when the query leaves `maxResults` unset.
pub const DEFAULT_MAX_RESULTS: u32 = 100;

/// A visited page as reported by a history store. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub title: String,
    pub visit_count: u32,
    /// Milliseconds since the Unix epoch.
    pub last_visit_time: i64,
}

/// Query descriptor understood by a history store.
///
/// Field names follow the browser history search API, so the serialized form
/// is `{"text": ..., "startTime": ...}` with unset bounds omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Substring matched against URL and title. Empty matches everything.
    pub text: String,
    /// Inclusive lower bound on last visit time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Inclusive upper bound on last visit time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl HistoryQuery {
    /// Creates an unbounded query for the given text.
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            start_time: None,
            end_time: None,
            max_results: None,
        }
    }

    /// Effective result cap for this query.
    pub fn limit(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}
