use std::time::Duration;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Opening the scoped connection for this call failed.
    #[error("Connection failed: {0}")]
    Connection(#[from] ConnectorError),

    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// SQLite driver error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The statement did not finish within the caller's bound.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    /// A blocking driver task panicked or was cancelled.
    #[error("Driver task failed: {0}")]
    Task(String),

    /// A parameter value has no representation in the server's type.
    #[error("Cannot bind parameter '{value}': {reason}")]
    Bind { value: String, reason: String },

    /// A result column could not be decoded into a value.
    #[error("Failed to decode column '{column}': {reason}")]
    Decode { column: String, reason: String },
}

/// Errors happening during connector or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The connection string could not be parsed.
    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    /// TLS connector construction failed.
    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("MySQL connection failed: {0}")]
    MySql(#[from] mysql_async::Error),

    #[error("PostgreSQL connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("SQLite open failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
