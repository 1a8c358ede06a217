use crate::sql::base::error::{ConnectorError, DbError};
use async_trait::async_trait;
use model::{core::value::Value, records::table::ResultTable};
use planner::query::dialect::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Postgres,
    Sqlite,
}

/// A read-only SQL backend.
///
/// Implementations hold connection settings only. Every call opens its own
/// connection and releases it before returning, on success and on error.
/// Dropping the returned future mid-flight releases the connection as well.
#[async_trait]
pub trait SqlConnector: Send + Sync {
    fn from_url(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    /// Runs one parameterized statement and materializes every row.
    async fn query_table(&self, sql: &str, params: Vec<Value>) -> Result<ResultTable, DbError>;

    /// Opens a connection and runs `SELECT 1`.
    async fn ping(&self) -> Result<(), DbError>;

    fn dialect(&self) -> &dyn Dialect;

    fn kind(&self) -> DatabaseKind;
}
