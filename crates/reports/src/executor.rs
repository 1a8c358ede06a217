use crate::{catalog::query::ReportQuery, error::ReportError, filter::CompiledPredicate};
use connectors::sql::base::{connector::SqlConnector, error::DbError};
use model::{core::value::Value, records::table::ResultTable};
use planner::query::{ast::select::Select, renderer::render_sql};
use std::{sync::Arc, time::Duration, time::Instant};
use tracing::{debug, info};

/// Runs composed report queries through a connector, one attempt per call.
#[derive(Clone)]
pub struct QueryExecutor {
    connector: Arc<dyn SqlConnector>,
    timeout: Option<Duration>,
}

impl QueryExecutor {
    pub fn new(connector: Arc<dyn SqlConnector>) -> Self {
        Self {
            connector,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// SQL text and bound parameters for `report` with `predicate` applied.
    pub fn render(&self, report: &ReportQuery, predicate: &CompiledPredicate) -> (String, Vec<Value>) {
        let composed = predicate.apply(report.select());
        render_sql(&composed, self.connector.dialect())
    }

    pub async fn execute(
        &self,
        report: &ReportQuery,
        predicate: &CompiledPredicate,
    ) -> Result<ResultTable, ReportError> {
        let composed = predicate.apply(report.select());
        self.execute_select(report.name(), &composed).await
    }

    /// Renders and runs an arbitrary `SELECT`; `label` names it in logs and
    /// errors.
    pub async fn execute_select(&self, label: &str, select: &Select) -> Result<ResultTable, ReportError> {
        let (sql, params) = render_sql(select, self.connector.dialect());
        debug!("Rendered SQL for '{}': {}", label, sql);
        debug!("Binding {} parameter(s)", params.len());

        let started = Instant::now();
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.connector.query_table(&sql, params))
                .await
                .unwrap_or(Err(DbError::Timeout(limit))),
            None => self.connector.query_table(&sql, params).await,
        };

        let table = result.map_err(|source| ReportError::QueryExecution {
            report: label.to_string(),
            source,
        })?;

        info!(
            "Report '{}' returned {} rows in {:?}",
            label,
            table.row_count(),
            started.elapsed()
        );
        Ok(table)
    }
}
