use connectors::{error::AdapterError, sql::base::error::DbError};
use reports::{config::ConfigError, error::ReportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Settings(#[from] ConfigError),

    #[error("Invalid connection format provided: {0}")]
    InvalidConnectionFormat(#[from] AdapterError),

    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("Connection test failed: {0}")]
    Connection(#[from] DbError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
