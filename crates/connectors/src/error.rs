use crate::sql::base::error::ConnectorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// An unsupported data format was requested.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The connection string does not reveal which backend it targets.
    #[error("Cannot infer database format from '{0}'; pass the format explicitly")]
    UnknownFormat(String),

    /// Failed to initialize a data connector.
    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),
}
