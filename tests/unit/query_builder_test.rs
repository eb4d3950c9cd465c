//! Unit tests for the Query Builder, including the end-to-end scenario of a
//! host that applies the query's time bound.

use chrono::Utc;
use rstest::rstest;
use serde_json::json;

use ticketscope::services::query_builder::{build, build_in};
use ticketscope::services::result_filter::filter_entries;
use ticketscope::types::history::{HistoryEntry, TICKET_PATH_PATTERN};
use ticketscope::types::time_filter::{Resolution, SinceTag, TimeFilter, WeekStart};

/// 2024-01-15T10:00:00Z
const NOW: i64 = 1_705_312_800_000;
/// 2024-01-15T00:00:00Z
const TODAY_UTC: i64 = 1_705_276_800_000;

#[rstest]
#[case("oneHourAgo")]
#[case("today")]
#[case("yesterday")]
#[case("thisWeek")]
#[case("thisMonth")]
#[case("6")]
#[case("0.25")]
#[case("sometime")]
#[case("")]
fn test_text_pattern_is_fixed(#[case] raw: &str) {
    let query = build_in(&TimeFilter::parse(raw), NOW, WeekStart::Sunday, &Utc).unwrap();
    assert_eq!(query.query.text, TICKET_PATH_PATTERN);
    assert_eq!(query.query.end_time, None);
    assert_eq!(query.query.max_results, None);
}

#[test]
fn test_today_sets_start_time() {
    let query = build_in(&TimeFilter::Since(SinceTag::Today), NOW, WeekStart::Sunday, &Utc).unwrap();
    assert_eq!(query.query.start_time, Some(TODAY_UTC));
    assert_eq!(query.resolution, Resolution::Bounded(TODAY_UTC));
    assert!(!query.is_unbounded());
}

/// An unrecognized since value produces a query with no lower bound at all.
/// Callers see this through `is_unbounded()` and the `Unrecognized` resolution.
#[test]
fn test_unrecognized_tag_degrades_to_unbounded_query() {
    let query = build_in(&TimeFilter::parse("lastFortnight"), NOW, WeekStart::Sunday, &Utc).unwrap();
    assert!(query.is_unbounded());
    assert_eq!(query.query.start_time, None);
    assert_eq!(query.resolution, Resolution::Unrecognized("lastFortnight".to_string()));
}

#[test]
fn test_invalid_hours_is_an_error() {
    assert!(build(&TimeFilter::HoursAgo(-1.0), NOW, WeekStart::Sunday).is_err());
}

#[test]
fn test_wire_shape() {
    let bounded = build_in(&TimeFilter::Since(SinceTag::Today), NOW, WeekStart::Sunday, &Utc).unwrap();
    assert_eq!(
        serde_json::to_value(&bounded.query).unwrap(),
        json!({"text": "tickets/ticketdet", "startTime": TODAY_UTC})
    );

    let unbounded = build_in(&TimeFilter::parse("nope"), NOW, WeekStart::Sunday, &Utc).unwrap();
    assert_eq!(
        serde_json::to_value(&unbounded.query).unwrap(),
        json!({"text": "tickets/ticketdet"})
    );
}

fn entry(title: &str, last_visit_time: i64) -> HistoryEntry {
    HistoryEntry {
        id: title.to_string(),
        url: format!("https://desk.example.com/tickets/ticketdetail?title={}", title),
        title: title.to_string(),
        visit_count: 1,
        last_visit_time,
    }
}

/// now = 2024-01-15T10:00Z, filter = today: a host honouring startTime
/// returns only the entry visited after midnight.
#[test]
fn test_end_to_end_today() {
    let query = build_in(&TimeFilter::Since(SinceTag::Today), NOW, WeekStart::Sunday, &Utc).unwrap();
    let start = query.query.start_time.unwrap();
    assert_eq!(start, TODAY_UTC);

    let host_history = vec![entry("x", start - 1), entry("y", start + 1)];
    let host_response: Vec<HistoryEntry> = host_history
        .into_iter()
        .filter(|e| query.query.start_time.map_or(true, |s| e.last_visit_time >= s))
        .collect();

    let shown = filter_entries(host_response, None);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "y");
}
