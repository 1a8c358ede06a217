use crate::sql::{
    base::{
        connector::{DatabaseKind, SqlConnector},
        error::{ConnectorError, DbError},
    },
    postgres::{
        params::PgParamStore,
        row::{column_data_type, row_values},
        utils::connect_client,
    },
};
use async_trait::async_trait;
use model::{
    core::value::Value,
    records::table::{ColumnHeader, ResultTable},
};
use planner::query::dialect::{self, Dialect};
use tokio_postgres::{Client, Config};
use tracing::debug;

#[derive(Clone)]
pub struct PgConnector {
    config: Config,
    dialect: dialect::Postgres,
}

impl PgConnector {
    /// The client owns the only handle to its connection task; dropping it
    /// closes the session.
    async fn connect(&self) -> Result<Client, DbError> {
        Ok(connect_client(&self.config).await?)
    }
}

#[async_trait]
impl SqlConnector for PgConnector {
    fn from_url(url: &str) -> Result<Self, ConnectorError> {
        let config = url
            .parse::<Config>()
            .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        Ok(PgConnector {
            config,
            dialect: dialect::Postgres,
        })
    }

    async fn query_table(&self, sql: &str, params: Vec<Value>) -> Result<ResultTable, DbError> {
        let client = self.connect().await?;

        let stmt = client.prepare(sql).await?;
        let store = PgParamStore::for_statement(&params, stmt.params())?;
        let rows = client.query(&stmt, &store.as_refs()).await?;
        debug!("Postgres returned {} rows", rows.len());

        let headers = stmt
            .columns()
            .iter()
            .map(|col| ColumnHeader::new(col.name(), column_data_type(col.type_())))
            .collect();
        let values = rows
            .iter()
            .map(row_values)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultTable::new(headers, values))
    }

    async fn ping(&self) -> Result<(), DbError> {
        let client = self.connect().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_parses_postgres_url() {
        let connector =
            PgConnector::from_url("postgres://user:pw@localhost:5432/food?sslmode=disable")
                .unwrap();
        assert_eq!(connector.kind(), DatabaseKind::Postgres);
        assert_eq!(connector.dialect().get_placeholder(0), "$1");
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        let err = PgConnector::from_url("postgres://user@host:notaport/db")
            .err()
            .unwrap();
        assert!(matches!(err, ConnectorError::InvalidUrl(_)));
    }
}
