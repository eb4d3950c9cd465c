use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Symbolic "since" choices offered by the time-window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinceTag {
    OneHourAgo,
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
}

impl SinceTag {
    pub const ALL: [SinceTag; 5] = [
        SinceTag::OneHourAgo,
        SinceTag::Today,
        SinceTag::Yesterday,
        SinceTag::ThisWeek,
        SinceTag::ThisMonth,
    ];

    /// Name used in persisted settings and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SinceTag::OneHourAgo => "oneHourAgo",
            SinceTag::Today => "today",
            SinceTag::Yesterday => "yesterday",
            SinceTag::ThisWeek => "thisWeek",
            SinceTag::ThisMonth => "thisMonth",
        }
    }

    /// Looks up a tag by its wire name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
    }
}

/// Lower bound on result recency chosen by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeFilter {
    /// A calendar-relative window such as "today".
    Since(SinceTag),
    /// A fixed number of hours before now.
    HoursAgo(f64),
    /// A value that matched neither form. Kept so callers can report it.
    Unrecognized(String),
}

impl TimeFilter {
    /// Parses a selector value. Never fails: unknown input becomes
    /// `Unrecognized` so it can be reported instead of silently dropped.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if let Some(tag) = SinceTag::from_name(trimmed) {
            return TimeFilter::Since(tag);
        }
        match trimmed.parse::<f64>() {
            Ok(hours) if hours.is_finite() => TimeFilter::HoursAgo(hours),
            _ => TimeFilter::Unrecognized(value.to_string()),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFilter::Since(tag) => write!(f, "{}", tag.as_str()),
            TimeFilter::HoursAgo(hours) => write!(f, "{}", hours),
            TimeFilter::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// First day of the calendar week used by `thisWeek`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    #[default]
    Sunday,
}

impl WeekStart {
    /// Days elapsed since the start of the week for the given weekday.
    pub fn days_into_week(&self, day: Weekday) -> u32 {
        match self {
            WeekStart::Monday => day.num_days_from_monday(),
            WeekStart::Sunday => day.num_days_from_sunday(),
        }
    }
}

/// Outcome of resolving a `TimeFilter`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Lower bound in epoch milliseconds.
    Bounded(i64),
    /// The filter was not recognized; no lower bound applies.
    Unrecognized(String),
}

impl Resolution {
    pub fn start_time(&self) -> Option<i64> {
        match self {
            Resolution::Bounded(ms) => Some(*ms),
            Resolution::Unrecognized(_) => None,
        }
    }
}
