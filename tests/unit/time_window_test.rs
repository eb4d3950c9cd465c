//! Unit tests for the Time Window Resolver.
//!
//! All calendar cases use an explicit zone so results do not depend on the
//! machine running the tests.

use chrono::{FixedOffset, TimeZone, Utc};
use rstest::rstest;

use ticketscope::services::time_window::{resolve, resolve_in, MS_PER_HOUR};
use ticketscope::types::errors::QueryError;
use ticketscope::types::time_filter::{Resolution, SinceTag, TimeFilter, WeekStart};

/// 2024-01-15T10:00:00Z, a Monday.
const NOW: i64 = 1_705_312_800_000;

fn since(tag: SinceTag) -> TimeFilter {
    TimeFilter::Since(tag)
}

fn resolve_utc(filter: &TimeFilter, week_start: WeekStart) -> Result<Resolution, QueryError> {
    resolve_in(filter, NOW, week_start, &Utc)
}

#[rstest]
#[case(SinceTag::OneHourAgo, WeekStart::Sunday, 1_705_309_200_000)]
#[case(SinceTag::Today, WeekStart::Sunday, 1_705_276_800_000)]
#[case(SinceTag::Yesterday, WeekStart::Sunday, 1_705_190_400_000)]
#[case(SinceTag::ThisWeek, WeekStart::Monday, 1_705_276_800_000)]
#[case(SinceTag::ThisWeek, WeekStart::Sunday, 1_705_190_400_000)]
#[case(SinceTag::ThisMonth, WeekStart::Sunday, 1_704_067_200_000)]
fn test_symbolic_tags_in_utc(
    #[case] tag: SinceTag,
    #[case] week_start: WeekStart,
    #[case] expected: i64,
) {
    assert_eq!(
        resolve_utc(&since(tag), week_start).unwrap(),
        Resolution::Bounded(expected)
    );
}

#[rstest]
#[case(0.0, NOW)]
#[case(1.0, NOW - MS_PER_HOUR)]
#[case(2.5, NOW - 9_000_000)]
#[case(24.0, NOW - 24 * MS_PER_HOUR)]
fn test_hours_ago(#[case] hours: f64, #[case] expected: i64) {
    assert_eq!(
        resolve_utc(&TimeFilter::HoursAgo(hours), WeekStart::Sunday).unwrap(),
        Resolution::Bounded(expected)
    );
}

#[test]
fn test_negative_hours_rejected() {
    let err = resolve_utc(&TimeFilter::HoursAgo(-3.0), WeekStart::Sunday).unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument(_)));
}

#[test]
fn test_unrecognized_tag_is_reported_not_zero() {
    let filter = TimeFilter::parse("lastFortnight");
    assert_eq!(
        resolve_utc(&filter, WeekStart::Sunday).unwrap(),
        Resolution::Unrecognized("lastFortnight".to_string())
    );
}

/// Midnight is taken in the given zone, not in UTC.
#[test]
fn test_today_uses_zone_offset() {
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    // 2024-01-15T10:00Z is 19:00 in UTC+9, so local midnight is 2024-01-14T15:00Z.
    let expected = Utc.with_ymd_and_hms(2024, 1, 14, 15, 0, 0).unwrap().timestamp_millis();
    assert_eq!(
        resolve_in(&since(SinceTag::Today), NOW, WeekStart::Sunday, &tz).unwrap(),
        Resolution::Bounded(expected)
    );
}

#[test]
fn test_day_boundary_west_of_utc() {
    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    // 2024-01-15T03:00Z is still 2024-01-14 22:00 in UTC-5.
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap().timestamp_millis();
    let expected = Utc.with_ymd_and_hms(2024, 1, 14, 5, 0, 0).unwrap().timestamp_millis();
    assert_eq!(
        resolve_in(&since(SinceTag::Today), now, WeekStart::Sunday, &tz).unwrap(),
        Resolution::Bounded(expected)
    );
}

#[test]
fn test_this_month_on_first_day_is_today() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap().timestamp_millis();
    let today = resolve_in(&since(SinceTag::Today), now, WeekStart::Sunday, &Utc).unwrap();
    let month = resolve_in(&since(SinceTag::ThisMonth), now, WeekStart::Sunday, &Utc).unwrap();
    assert_eq!(today, month);
}

#[test]
fn test_yesterday_crosses_month_and_year() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap().timestamp_millis();
    let expected = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap().timestamp_millis();
    assert_eq!(
        resolve_in(&since(SinceTag::Yesterday), now, WeekStart::Sunday, &Utc).unwrap(),
        Resolution::Bounded(expected)
    );
}

/// A day of 23 hours: local midnight after a spring-forward still resolves.
#[test]
fn test_today_after_dst_change() {
    let tz = chrono_tz::Europe::Berlin;
    // 2024-03-31 12:00 CEST (UTC+2); midnight that day was CET (UTC+1).
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 10, 0, 0).unwrap().timestamp_millis();
    let expected = Utc.with_ymd_and_hms(2024, 3, 30, 23, 0, 0).unwrap().timestamp_millis();
    assert_eq!(
        resolve_in(&since(SinceTag::Today), now, WeekStart::Sunday, &tz).unwrap(),
        Resolution::Bounded(expected)
    );
}

#[test]
fn test_midnight_skipped_by_dst_gap() {
    let tz = chrono_tz::America::Sao_Paulo;
    // Clocks jumped from 00:00 to 01:00 on 2018-11-04; first valid instant is 01:00-02:00.
    let now = Utc.with_ymd_and_hms(2018, 11, 4, 15, 0, 0).unwrap().timestamp_millis();
    let expected = Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap().timestamp_millis();
    assert_eq!(
        resolve_in(&since(SinceTag::Today), now, WeekStart::Sunday, &tz).unwrap(),
        Resolution::Bounded(expected)
    );
}

/// The local-zone entry point agrees with itself and stays below `now`.
#[test]
fn test_local_resolve_is_deterministic() {
    for tag in SinceTag::ALL {
        let first = resolve(&since(tag), NOW, WeekStart::Monday).unwrap();
        let second = resolve(&since(tag), NOW, WeekStart::Monday).unwrap();
        assert_eq!(first, second);
        let start = first.start_time().expect("known tags are bounded");
        assert!(start <= NOW);
    }
}
