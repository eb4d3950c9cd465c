use std::error::Error;

use ticketscope::types::errors::*;

// === QueryError Tests ===

#[test]
fn query_error_invalid_argument_display() {
    let err = QueryError::InvalidArgument("hours ago must be a non-negative number, got -2".to_string());
    assert_eq!(
        err.to_string(),
        "Invalid argument: hours ago must be a non-negative number, got -2"
    );
}

// === ClassifyError Tests ===

#[test]
fn classify_error_display_variants() {
    assert_eq!(ClassifyError::EmptyTitle.to_string(), "Ticket title is empty");
    assert_eq!(
        ClassifyError::MissingSeparator.to_string(),
        "Ticket title has no '-' separator"
    );
    assert_eq!(ClassifyError::MissingAction.to_string(), "Ticket title has no action");
    assert_eq!(
        ClassifyError::UnknownAction("Close".to_string()).to_string(),
        "Unknown ticket action: Close"
    );
    assert_eq!(ClassifyError::MissingTicketId.to_string(), "Ticket id not found");
}

#[test]
fn classify_error_implements_error_trait() {
    let err: Box<dyn Error> = Box::new(ClassifyError::MissingAction);
    assert!(err.source().is_none());
}

// === HistoryError Tests ===

#[test]
fn history_error_display_variants() {
    assert_eq!(
        HistoryError::NotFound("h-1".to_string()).to_string(),
        "History entry not found: h-1"
    );
    assert_eq!(
        HistoryError::DatabaseError("disk I/O error".to_string()).to_string(),
        "History database error: disk I/O error"
    );
    assert_eq!(
        HistoryError::SourceUnavailable("History is locked".to_string()).to_string(),
        "History source unavailable: History is locked"
    );
    assert_eq!(HistoryError::ReadOnly.to_string(), "History source is read-only");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
    assert_eq!(
        SettingsError::InvalidKey("nope".to_string()).to_string(),
        "Invalid settings key: nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("bad".to_string()).to_string(),
        "Invalid settings value: bad"
    );
}

// === SearchError Tests ===

#[test]
fn search_error_wraps_query_error() {
    let err: SearchError = QueryError::InvalidArgument("x".to_string()).into();
    assert_eq!(err, SearchError::InvalidQuery(QueryError::InvalidArgument("x".to_string())));
    assert_eq!(err.to_string(), "Invalid ticket query: Invalid argument: x");
    assert!(err.source().is_some());
}

#[test]
fn search_error_wraps_history_error() {
    let err: SearchError = HistoryError::ReadOnly.into();
    assert_eq!(err.to_string(), "History search failed: History source is read-only");
    let source = err.source().expect("history error should be the source");
    assert_eq!(source.to_string(), "History source is read-only");
}
