use std::fmt;

// === QueryError ===

/// Errors raised while turning a since filter into a history query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The filter or the reference time cannot be resolved to a timestamp.
    InvalidArgument(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for QueryError {}

// === ClassifyError ===

/// Reasons a page title cannot be classified as a ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The title is empty or whitespace only.
    EmptyTitle,
    /// The title has no `-` separating the classification from the subject.
    MissingSeparator,
    /// The text before the separator has no action token.
    MissingAction,
    /// The action token is not one of Detail, Edit or Update.
    UnknownAction(String),
    /// Neither the URL nor the title carries a numeric ticket id.
    MissingTicketId,
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::EmptyTitle => write!(f, "Ticket title is empty"),
            ClassifyError::MissingSeparator => {
                write!(f, "Ticket title has no '-' separator")
            }
            ClassifyError::MissingAction => write!(f, "Ticket title has no action"),
            ClassifyError::UnknownAction(token) => {
                write!(f, "Unknown ticket action: {}", token)
            }
            ClassifyError::MissingTicketId => write!(f, "Ticket id not found"),
        }
    }
}

impl std::error::Error for ClassifyError {}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
    /// The history source could not be opened or read.
    SourceUnavailable(String),
    /// The history source does not accept writes.
    ReadOnly,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::DatabaseError(msg) => write!(f, "History database error: {}", msg),
            HistoryError::SourceUnavailable(msg) => {
                write!(f, "History source unavailable: {}", msg)
            }
            HistoryError::ReadOnly => write!(f, "History source is read-only"),
        }
    }
}

impl std::error::Error for HistoryError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === SearchError ===

/// Errors from a full ticket search. A failed history call is reported here
/// and is never folded into an empty result list.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The since filter could not be turned into a query.
    InvalidQuery(QueryError),
    /// The history store failed to answer the query.
    HistoryUnavailable(HistoryError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidQuery(err) => write!(f, "Invalid ticket query: {}", err),
            SearchError::HistoryUnavailable(err) => {
                write!(f, "History search failed: {}", err)
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::InvalidQuery(err) => Some(err),
            SearchError::HistoryUnavailable(err) => Some(err),
        }
    }
}

impl From<QueryError> for SearchError {
    fn from(err: QueryError) -> Self {
        SearchError::InvalidQuery(err)
    }
}

impl From<HistoryError> for SearchError {
    fn from(err: HistoryError) -> Self {
        SearchError::HistoryUnavailable(err)
    }
}
