use crate::sql::{
    base::{
        connector::{DatabaseKind, SqlConnector},
        error::{ConnectorError, DbError},
    },
    mysql::{
        params::MySqlParamStore,
        row::{column_data_type, row_values},
    },
};
use async_trait::async_trait;
use model::{
    core::value::Value,
    records::table::{ColumnHeader, ResultTable},
};
use mysql_async::{Conn, Opts, Row, prelude::Queryable};
use planner::query::dialect::{self, Dialect};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct MySqlConnector {
    opts: Opts,
    dialect: dialect::MySql,
}

impl MySqlConnector {
    async fn connect(&self) -> Result<Conn, DbError> {
        let conn = Conn::new(self.opts.clone())
            .await
            .map_err(ConnectorError::MySql)?;
        Ok(conn)
    }

    async fn release(conn: Conn) {
        if let Err(err) = conn.disconnect().await {
            warn!(%err, "Failed to close MySQL connection");
        }
    }
}

#[async_trait]
impl SqlConnector for MySqlConnector {
    fn from_url(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        Ok(MySqlConnector {
            opts,
            dialect: dialect::MySql,
        })
    }

    async fn query_table(&self, sql: &str, params: Vec<Value>) -> Result<ResultTable, DbError> {
        let store = MySqlParamStore::from_values(&params);
        let mut conn = self.connect().await?;

        let fetched = async {
            let mut result = conn.exec_iter(sql, store.params()).await?;
            let columns = result
                .columns_ref()
                .iter()
                .map(|col| (col.name_str().to_string(), column_data_type(col)))
                .collect::<Vec<_>>();
            let rows = result.collect::<Row>().await?;
            Ok::<_, DbError>((columns, rows))
        }
        .await;

        Self::release(conn).await;

        let (columns, rows) = fetched?;
        debug!("MySQL returned {} rows", rows.len());

        let values = rows
            .into_iter()
            .map(|row| row_values(row, &columns))
            .collect::<Result<Vec<_>, _>>()?;
        let headers = columns
            .iter()
            .map(|(name, data_type)| ColumnHeader::new(name, *data_type))
            .collect();

        Ok(ResultTable::new(headers, values))
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.connect().await?;
        let result = conn.query_drop("SELECT 1").await;
        Self::release(conn).await;
        result.map_err(DbError::from)
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_rejects_garbage() {
        let err = MySqlConnector::from_url("not a url").err().unwrap();
        assert!(matches!(err, ConnectorError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_url_accepts_mysql_scheme() {
        let connector = MySqlConnector::from_url("mysql://user:pw@localhost:3306/food").unwrap();
        assert_eq!(connector.kind(), DatabaseKind::MySql);
        assert_eq!(connector.dialect().get_placeholder(1), "?");
    }
}
