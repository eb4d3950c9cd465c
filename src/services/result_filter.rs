//! Result Filter.
//!
//! Narrows history entries by a free-text phrase and orders them for display.

use crate::types::history::HistoryEntry;
use crate::types::settings::SortOrder;

/// Returns true when `entry`'s title contains `phrase`, ignoring case.
/// An absent or empty phrase matches everything.
pub fn matches(entry: &HistoryEntry, phrase: Option<&str>) -> bool {
    match phrase {
        None => true,
        Some(p) if p.is_empty() => true,
        Some(p) => entry.title.to_lowercase().contains(&p.to_lowercase()),
    }
}

/// Keeps the entries that match `phrase`, preserving their order.
pub fn filter_entries(entries: Vec<HistoryEntry>, phrase: Option<&str>) -> Vec<HistoryEntry> {
    entries
        .into_iter()
        .filter(|entry| matches(entry, phrase))
        .collect()
}

/// Sorts entries in place by the chosen order.
pub fn sort_entries(entries: &mut [HistoryEntry], order: SortOrder) {
    match order {
        SortOrder::Recency => entries.sort_by(|a, b| {
            b.last_visit_time
                .cmp(&a.last_visit_time)
                .then(b.visit_count.cmp(&a.visit_count))
        }),
        SortOrder::VisitCount => entries.sort_by(|a, b| {
            b.visit_count
                .cmp(&a.visit_count)
                .then(b.last_visit_time.cmp(&a.last_visit_time))
        }),
    }
}
