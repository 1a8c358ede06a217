use connectors::{file::csv::error::FileError, sql::base::error::DbError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// No report is registered under the requested name.
    #[error("Report not found: {0}")]
    NotFound(String),

    /// A filter key is not declared for the report, or its value is malformed.
    /// Raised before any database work.
    #[error("Invalid filter '{key}': {reason}")]
    InvalidFilter { key: String, reason: String },

    /// The database call failed. Nothing partial is returned.
    #[error("Query '{report}' failed: {source}")]
    QueryExecution {
        report: String,
        #[source]
        source: DbError,
    },

    #[error("CSV export failed: {0}")]
    Export(#[from] FileError),

    /// A report definition breaks a catalog invariant.
    #[error("Invalid report catalog: {0}")]
    Catalog(String),
}

impl ReportError {
    pub fn invalid_filter(key: &str, reason: impl Into<String>) -> Self {
        ReportError::InvalidFilter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
