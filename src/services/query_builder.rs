//! Query Builder.
//!
//! Combines the fixed ticket path pattern with a resolved since filter into
//! the query handed to a history store.

use chrono::{Local, TimeZone};

use crate::services::time_window::resolve_in;
use crate::types::errors::QueryError;
use crate::types::history::{HistoryQuery, TICKET_PATH_PATTERN};
use crate::types::time_filter::{Resolution, TimeFilter, WeekStart};

/// A history query together with how its lower bound was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketQuery {
    pub query: HistoryQuery,
    pub resolution: Resolution,
}

impl TicketQuery {
    /// True when no lower bound applies, which is what an unrecognized
    /// since value degrades to.
    pub fn is_unbounded(&self) -> bool {
        self.query.start_time.is_none()
    }
}

/// Builds the ticket query for `filter` in the local time zone.
pub fn build(
    filter: &TimeFilter,
    now_ms: i64,
    week_start: WeekStart,
) -> Result<TicketQuery, QueryError> {
    build_in(filter, now_ms, week_start, &Local)
}

/// Builds the ticket query for `filter` in the given time zone.
pub fn build_in<Tz: TimeZone>(
    filter: &TimeFilter,
    now_ms: i64,
    week_start: WeekStart,
    tz: &Tz,
) -> Result<TicketQuery, QueryError> {
    let resolution = resolve_in(filter, now_ms, week_start, tz)?;

    let mut query = HistoryQuery::text(TICKET_PATH_PATTERN);
    query.start_time = resolution.start_time();

    match &resolution {
        Resolution::Bounded(start) => {
            log::debug!("ticket query for {} starts at {}", filter, start);
        }
        Resolution::Unrecognized(raw) => {
            log::warn!("since value {:?} not recognized, searching without a lower bound", raw);
        }
    }

    Ok(TicketQuery { query, resolution })
}
