use async_trait::async_trait;
use connectors::sql::base::{
    connector::{DatabaseKind, SqlConnector},
    error::{ConnectorError, DbError},
};
use model::{
    core::value::Value,
    records::table::{ColumnHeader, ResultTable},
};
use planner::query::dialect::{self, Dialect};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// In-memory connector that records every statement and replays a canned
/// result.
#[derive(Clone)]
pub struct RecordingConnector {
    calls: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
    response: Arc<Mutex<Option<Result<ResultTable, String>>>>,
    delay: Option<Duration>,
    dialect: dialect::Sqlite,
}

impl RecordingConnector {
    pub fn returning(table: ResultTable) -> Self {
        Self {
            calls: Arc::default(),
            response: Arc::new(Mutex::new(Some(Ok(table)))),
            delay: None,
            dialect: dialect::Sqlite,
        }
    }

    pub fn failing(message: &str) -> Self {
        let connector = Self::returning(ResultTable::empty(Vec::new()));
        *connector.response.lock().unwrap() = Some(Err(message.to_string()));
        connector
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> ResultTable {
    let headers = columns
        .iter()
        .map(|name| ColumnHeader::new(name, model::core::data_type::DataType::String))
        .collect();
    ResultTable::new(headers, rows)
}

#[async_trait]
impl SqlConnector for RecordingConnector {
    fn from_url(_url: &str) -> Result<Self, ConnectorError> {
        Ok(Self::returning(ResultTable::empty(Vec::new())))
    }

    async fn query_table(&self, sql: &str, params: Vec<Value>) -> Result<ResultTable, DbError> {
        self.calls.lock().unwrap().push((sql.to_string(), params));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.response.lock().unwrap().clone() {
            Some(Ok(table)) => Ok(table),
            Some(Err(message)) => Err(DbError::Task(message)),
            None => Ok(ResultTable::empty(Vec::new())),
        }
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}
