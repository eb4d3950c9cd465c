use serde::{Deserialize, Serialize};

use super::time_filter::{TimeFilter, WeekStart};

/// Since value used when nothing has been saved yet.
pub const DEFAULT_SINCE: &str = "today";

/// Debounce applied to free-text searches, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Top-level user settings, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub filter: HistoryFilter,
    pub week_start: WeekStart,
    pub sort: SortOrder,
    pub debounce_ms: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            filter: HistoryFilter::default(),
            week_start: WeekStart::default(),
            sort: SortOrder::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl UserSettings {
    /// Parsed form of the saved since value.
    pub fn time_filter(&self) -> TimeFilter {
        TimeFilter::parse(&self.filter.since)
    }
}

/// Saved time-window choice.
///
/// Written as `{"since": "<tag or hours>"}`. The older
/// `{"sinceHoursAgo": "<hours>"}` layout is accepted on read and folded into
/// `since`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StoredHistoryFilter")]
pub struct HistoryFilter {
    pub since: String,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            since: DEFAULT_SINCE.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredHistoryFilter {
    #[serde(default)]
    since: Option<String>,
    #[serde(default)]
    since_hours_ago: Option<HoursValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HoursValue {
    Number(f64),
    Text(String),
}

impl From<StoredHistoryFilter> for HistoryFilter {
    fn from(stored: StoredHistoryFilter) -> Self {
        if let Some(since) = stored.since {
            return Self { since };
        }
        match stored.since_hours_ago {
            Some(hours) => {
                let since = match hours {
                    HoursValue::Number(n) => n.to_string(),
                    HoursValue::Text(s) => s.trim().to_string(),
                };
                log::info!("migrating legacy sinceHoursAgo setting to since = {:?}", since);
                Self { since }
            }
            None => Self::default(),
        }
    }
}

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Most recently visited first.
    #[default]
    Recency,
    /// Most visited first.
    VisitCount,
}
