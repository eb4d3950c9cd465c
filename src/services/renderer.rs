//! Plain-text rendering of ticket search results.

use crate::types::ticket::TicketRow;

/// Summary line shown above the results.
pub fn result_count_label(count: usize) -> String {
    format!("{} Ticket(s)", count)
}

/// Describes how long ago `then_ms` was relative to `now_ms`, in the style
/// "5 minutes ago" / "in a few seconds".
pub fn relative_time(then_ms: i64, now_ms: i64) -> String {
    let delta_ms = now_ms.saturating_sub(then_ms);
    let phrase = duration_phrase(delta_ms.unsigned_abs());
    if delta_ms >= 0 {
        format!("{} ago", phrase)
    } else {
        format!("in {}", phrase)
    }
}

fn duration_phrase(ms: u64) -> String {
    let seconds = (ms as f64 / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();
    let months = (days / 30.4).round();
    let years = (days / 365.0).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", months)
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}

/// Renders rows as a table of visits, title and last visit, with the URL
/// on a second line.
pub fn render_table(rows: &[TicketRow], now_ms: i64) -> String {
    let mut out = String::new();
    out.push_str(&result_count_label(rows.len()));
    out.push('\n');
    if rows.is_empty() {
        return out;
    }

    let title_width = rows
        .iter()
        .map(|row| row.entry.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("Ticket".len());

    out.push_str(&format!(
        "{:>6}  {:<width$}  {}\n",
        "Visits",
        "Ticket",
        "Last visited",
        width = title_width
    ));
    for row in rows {
        out.push_str(&format!(
            "{:>6}  {:<width$}  {}\n",
            row.entry.visit_count,
            row.entry.title,
            relative_time(row.entry.last_visit_time, now_ms),
            width = title_width
        ));
        out.push_str(&format!("{:>6}  {}\n", "", row.entry.url));
    }
    out
}
