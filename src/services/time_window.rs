//! Time Window Resolver.
//!
//! Turns a `TimeFilter` into the epoch-millisecond lower bound of a history
//! search. The reference time is always passed in, so resolution is a pure
//! function of `(filter, now, week_start, zone)`.

use chrono::{Datelike, Days, Local, LocalResult, NaiveDate, TimeDelta, TimeZone};

use crate::types::errors::QueryError;
use crate::types::time_filter::{Resolution, SinceTag, TimeFilter, WeekStart};

pub const MS_PER_HOUR: i64 = 3_600_000;

/// Longest daylight-saving gap searched when local midnight does not exist.
const MAX_GAP_MINUTES: i64 = 180;

/// Resolves `filter` against `now_ms` in the local time zone.
pub fn resolve(
    filter: &TimeFilter,
    now_ms: i64,
    week_start: WeekStart,
) -> Result<Resolution, QueryError> {
    resolve_in(filter, now_ms, week_start, &Local)
}

/// Resolves `filter` against `now_ms` in the given time zone.
///
/// Calendar tags resolve to local midnight of the first day of the window.
/// An unrecognized filter is not an error: it is logged and returned as
/// `Resolution::Unrecognized` so the caller decides what to do with it.
pub fn resolve_in<Tz: TimeZone>(
    filter: &TimeFilter,
    now_ms: i64,
    week_start: WeekStart,
    tz: &Tz,
) -> Result<Resolution, QueryError> {
    let start = match filter {
        TimeFilter::Since(SinceTag::OneHourAgo) => hours_before(now_ms, 1.0)?,
        TimeFilter::Since(SinceTag::Today) => local_midnight_ms(local_date(now_ms, tz)?, tz)?,
        TimeFilter::Since(SinceTag::Yesterday) => {
            let today = local_date(now_ms, tz)?;
            let yesterday = today
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| out_of_range(now_ms))?;
            local_midnight_ms(yesterday, tz)?
        }
        TimeFilter::Since(SinceTag::ThisWeek) => {
            let today = local_date(now_ms, tz)?;
            let offset = week_start.days_into_week(today.weekday());
            let first = today
                .checked_sub_days(Days::new(u64::from(offset)))
                .ok_or_else(|| out_of_range(now_ms))?;
            local_midnight_ms(first, tz)?
        }
        TimeFilter::Since(SinceTag::ThisMonth) => {
            let today = local_date(now_ms, tz)?;
            let first = today.with_day(1).ok_or_else(|| out_of_range(now_ms))?;
            local_midnight_ms(first, tz)?
        }
        TimeFilter::HoursAgo(hours) => hours_before(now_ms, *hours)?,
        TimeFilter::Unrecognized(raw) => {
            log::warn!("since option not supported: {:?}", raw);
            return Ok(Resolution::Unrecognized(raw.clone()));
        }
    };
    Ok(Resolution::Bounded(start))
}

fn out_of_range(now_ms: i64) -> QueryError {
    QueryError::InvalidArgument(format!("reference time out of range: {}", now_ms))
}

fn hours_before(now_ms: i64, hours: f64) -> Result<i64, QueryError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(QueryError::InvalidArgument(format!(
            "hours ago must be a non-negative number, got {}",
            hours
        )));
    }
    let offset = (hours * MS_PER_HOUR as f64).round();
    if offset >= i64::MAX as f64 {
        return Err(out_of_range(now_ms));
    }
    now_ms
        .checked_sub(offset as i64)
        .ok_or_else(|| out_of_range(now_ms))
}

fn local_date<Tz: TimeZone>(now_ms: i64, tz: &Tz) -> Result<NaiveDate, QueryError> {
    match tz.timestamp_millis_opt(now_ms) {
        LocalResult::Single(dt) => Ok(dt.date_naive()),
        _ => Err(out_of_range(now_ms)),
    }
}

/// First instant of `day` in `tz`.
///
/// An ambiguous midnight takes the earlier instant. A midnight skipped by a
/// daylight-saving jump takes the first valid local minute after it.
fn local_midnight_ms<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Result<i64, QueryError> {
    let midnight = day.and_hms_opt(0, 0, 0).ok_or_else(|| {
        QueryError::InvalidArgument(format!("no midnight for {}", day))
    })?;
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Ok(dt.timestamp_millis()),
        LocalResult::Ambiguous(a, b) => Ok(a.timestamp_millis().min(b.timestamp_millis())),
        LocalResult::None => {
            for minutes in 1..=MAX_GAP_MINUTES {
                let candidate = midnight + TimeDelta::minutes(minutes);
                if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
                    return Ok(dt.timestamp_millis());
                }
            }
            Err(QueryError::InvalidArgument(format!(
                "no valid local time near midnight of {}",
                day
            )))
        }
    }
}
