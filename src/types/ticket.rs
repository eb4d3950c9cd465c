use serde::{Deserialize, Serialize};

use super::history::HistoryEntry;

/// What the user was doing on a ticket page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketAction {
    Detail,
    Edit,
    Update,
}

impl TicketAction {
    /// Maps a title token onto an action, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "detail" => Some(TicketAction::Detail),
            "edit" => Some(TicketAction::Edit),
            "update" => Some(TicketAction::Update),
            _ => None,
        }
    }
}

/// Pieces of a `"<Classification> <Action> - <subject>"` page title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleClassification {
    pub classification: String,
    pub action: TicketAction,
    pub subject: String,
}

/// Structured view of a ticket page, computed per search and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub id: u64,
    pub title: String,
    pub classification: String,
    pub subject: String,
    pub visit_count: u32,
    #[serde(rename = "lastVisitedUnixMS")]
    pub last_visited_unix_ms: i64,
    pub ticket_action: TicketAction,
}

/// A history entry paired with its ticket summary, when the title classifies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRow {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub ticket: Option<TicketSummary>,
}
