use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors surfaced by the metric engine.
///
/// Empty results are never an error: every aggregation returns an empty
/// collection or a `None` scalar when nothing matches.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A parameter is missing or outside its declared range. Raised before
    /// any query runs.
    #[error("invalid parameter: {0}")]
    Validation(String),

    /// The backing database cannot be opened, locked or read.
    #[error("election store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("query failed: {0}")]
    Query(String),
}

impl AnalyticsError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AnalyticsError::Validation(message.into())
    }

    /// Short machine readable label, used in responses and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyticsError::Validation(_) => "validation",
            AnalyticsError::StoreUnavailable(_) => "store_unavailable",
            AnalyticsError::Query(_) => "query",
        }
    }
}

impl From<rusqlite::Error> for AnalyticsError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::CannotOpen
                | ErrorCode::PermissionDenied
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::SystemIoFailure => AnalyticsError::StoreUnavailable(err.to_string()),
                _ => AnalyticsError::Query(err.to_string()),
            },
            _ => AnalyticsError::Query(err.to_string()),
        }
    }
}
