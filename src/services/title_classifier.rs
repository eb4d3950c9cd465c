//! Title Classifier.
//!
//! Parses ticket page titles of the form
//! `"<Classification> <Action> - <subject>"` into a `TicketSummary`.
//!
//! The split point is the first `-` in the title, including one at index 0:
//! a leading dash leaves nothing before the separator, which is reported as
//! `ClassifyError::MissingAction` rather than `MissingSeparator`.

use url::Url;

use crate::types::errors::ClassifyError;
use crate::types::history::HistoryEntry;
use crate::types::ticket::{TicketAction, TicketSummary, TitleClassification};

/// Query parameter names that carry the ticket id, compared ignoring case.
const TICKET_ID_KEYS: [&str; 3] = ["id", "ticketid", "ticket_id"];

/// Splits a page title into classification, action and subject.
pub fn classify_title(title: &str) -> Result<TitleClassification, ClassifyError> {
    if title.trim().is_empty() {
        return Err(ClassifyError::EmptyTitle);
    }

    let dash = title.find('-').ok_or(ClassifyError::MissingSeparator)?;
    let (head, rest) = (&title[..dash], &title[dash + 1..]);

    let mut tokens = head.split_whitespace();
    let classification = tokens.next().ok_or(ClassifyError::MissingAction)?;
    let action_token = tokens.next().ok_or(ClassifyError::MissingAction)?;
    let action = TicketAction::from_token(action_token)
        .ok_or_else(|| ClassifyError::UnknownAction(action_token.to_string()))?;

    Ok(TitleClassification {
        classification: classification.to_string(),
        action,
        subject: rest.trim().to_string(),
    })
}

/// Extracts a numeric ticket id from a ticket page URL.
///
/// Looks at the `id`/`ticketid`/`ticket_id` query parameters first, then at
/// a numeric last path segment.
pub fn ticket_id_from_url(url: &str) -> Option<u64> {
    let parsed = Url::parse(url).ok()?;

    let from_query = parsed
        .query_pairs()
        .filter(|(key, _)| TICKET_ID_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)))
        .find_map(|(_, value)| value.trim().parse::<u64>().ok());
    if from_query.is_some() {
        return from_query;
    }

    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .and_then(|segment| segment.parse::<u64>().ok())
}

/// Extracts the first `#<digits>` token from free text.
pub fn ticket_id_from_text(text: &str) -> Option<u64> {
    text.split_whitespace().find_map(|word| {
        let digits = word
            .strip_prefix('#')?
            .trim_end_matches(|c: char| !c.is_ascii_digit());
        digits.parse::<u64>().ok()
    })
}

/// Builds a `TicketSummary` from a history entry.
pub fn summarize(entry: &HistoryEntry) -> Result<TicketSummary, ClassifyError> {
    let parts = classify_title(&entry.title)?;
    let id = ticket_id_from_url(&entry.url)
        .or_else(|| ticket_id_from_text(&parts.subject))
        .ok_or(ClassifyError::MissingTicketId)?;

    Ok(TicketSummary {
        id,
        title: entry.title.clone(),
        classification: parts.classification,
        subject: parts.subject,
        visit_count: entry.visit_count,
        last_visited_unix_ms: entry.last_visit_time,
        ticket_action: parts.action,
    })
}
