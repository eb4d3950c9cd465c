//! Property-based tests for the Result Filter.

use proptest::prelude::*;

use ticketscope::services::result_filter::{filter_entries, matches, sort_entries};
use ticketscope::types::history::HistoryEntry;
use ticketscope::types::settings::SortOrder;

fn arb_entry() -> impl Strategy<Value = HistoryEntry> {
    (
        "[a-z0-9]{1,8}",
        "\\PC{0,40}",
        0u32..500u32,
        0i64..4_000_000_000_000i64,
    )
        .prop_map(|(id, title, visit_count, last_visit_time)| HistoryEntry {
            url: format!("https://desk.example.com/tickets/ticketdetail?id={}", id),
            id,
            title,
            visit_count,
            last_visit_time,
        })
}

fn arb_ascii_title() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 -]{1,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn empty_phrase_matches_everything(entry in arb_entry()) {
        prop_assert!(matches(&entry, Some("")));
        prop_assert!(matches(&entry, None));
    }

    /// Any substring of the title matches, in upper or lower case.
    #[test]
    fn substring_matches_ignoring_case(
        title in arb_ascii_title(),
        range in (0usize..40, 0usize..40),
    ) {
        let (a, b) = range;
        let (start, end) = (a.min(b).min(title.len()), a.max(b).min(title.len()));
        let phrase = &title[start..end];
        let entry = HistoryEntry {
            id: "1".to_string(),
            url: "https://desk.example.com/tickets/ticketdetail?id=1".to_string(),
            title: title.clone(),
            visit_count: 1,
            last_visit_time: 0,
        };
        prop_assert!(matches(&entry, Some(&phrase.to_uppercase())));
        prop_assert!(matches(&entry, Some(&phrase.to_lowercase())));
    }

    /// The predicate neither mutates the entry nor changes its answer.
    #[test]
    fn matches_is_pure(entry in arb_entry(), phrase in "\\PC{0,8}") {
        let before = entry.clone();
        let first = matches(&entry, Some(&phrase));
        let second = matches(&entry, Some(&phrase));
        prop_assert_eq!(first, second);
        prop_assert_eq!(entry, before);
    }

    #[test]
    fn filter_keeps_order_of_matching_entries(
        entries in proptest::collection::vec(arb_entry(), 0..20),
        phrase in "[a-z]{0,2}",
    ) {
        let expected: Vec<HistoryEntry> = entries
            .iter()
            .filter(|e| matches(e, Some(&phrase)))
            .cloned()
            .collect();
        prop_assert_eq!(filter_entries(entries, Some(&phrase)), expected);
    }

    #[test]
    fn recency_sort_orders_by_last_visit(mut entries in proptest::collection::vec(arb_entry(), 0..20)) {
        let len = entries.len();
        sort_entries(&mut entries, SortOrder::Recency);
        prop_assert_eq!(entries.len(), len);
        for pair in entries.windows(2) {
            prop_assert!(pair[0].last_visit_time >= pair[1].last_visit_time);
            if pair[0].last_visit_time == pair[1].last_visit_time {
                prop_assert!(pair[0].visit_count >= pair[1].visit_count);
            }
        }
    }

    #[test]
    fn visit_count_sort_orders_by_visits(mut entries in proptest::collection::vec(arb_entry(), 0..20)) {
        sort_entries(&mut entries, SortOrder::VisitCount);
        for pair in entries.windows(2) {
            prop_assert!(pair[0].visit_count >= pair[1].visit_count);
            if pair[0].visit_count == pair[1].visit_count {
                prop_assert!(pair[0].last_visit_time >= pair[1].last_visit_time);
            }
        }
    }
}
