use crate::{
    catalog::ReportCatalog,
    error::ReportError,
    executor::QueryExecutor,
    filter::{FilterCompiler, FilterSpec, keys},
};
use connectors::{file::csv::writer::CsvTableWriter, sql::base::connector::SqlConnector};
use model::records::table::ResultTable;
use planner::query::{ast::common::TableRef, builder::select::SelectBuilder, qualified};
use std::{sync::Arc, time::Duration};
use tracing::info;

/// Caller-facing entry point: list, run and export reports.
#[derive(Clone)]
pub struct ReportService {
    catalog: Arc<ReportCatalog>,
    executor: QueryExecutor,
}

impl ReportService {
    pub fn new(catalog: Arc<ReportCatalog>, connector: Arc<dyn SqlConnector>) -> Self {
        Self {
            catalog,
            executor: QueryExecutor::new(connector),
        }
    }

    /// Service over the built-in reports.
    pub fn with_default_catalog(connector: Arc<dyn SqlConnector>) -> Result<Self, ReportError> {
        Ok(Self::new(ReportCatalog::global()?, connector))
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.executor = self.executor.with_timeout(timeout);
        self
    }

    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    pub fn list_queries(&self) -> Vec<String> {
        self.catalog.list_query_names()
    }

    /// Looks up `name`, validates `filters` against it and runs it.
    ///
    /// Unknown reports and bad filters fail before the database is touched.
    pub async fn run_query(&self, name: &str, filters: &FilterSpec) -> Result<ResultTable, ReportError> {
        let report = self.catalog.get(name)?;
        let predicate = FilterCompiler::compile(report, filters)?;
        info!(
            "Running report '{}' with {} active filter(s)",
            name,
            predicate.predicates().len()
        );
        self.executor.execute(report, &predicate).await
    }

    pub fn export_csv(&self, table: &ResultTable) -> Result<Vec<u8>, ReportError> {
        Ok(CsvTableWriter::new().to_bytes(table)?)
    }

    pub fn filter_keys(&self) -> Vec<&'static str> {
        keys::keys()
    }

    /// Distinct non-null values of a filter's column, sorted ascending.
    pub async fn filter_options(&self, key: &str) -> Result<Vec<String>, ReportError> {
        let filter = keys::lookup(key).ok_or_else(|| {
            ReportError::invalid_filter(
                key,
                format!("unknown filter (expected one of: {})", keys::keys().join(", ")),
            )
        })?;

        let select = SelectBuilder::new()
            .select_distinct(vec![qualified(filter.qualifier, filter.column)])
            .from(TableRef::new(filter.table), Some(filter.qualifier))
            .build();

        let table = self
            .executor
            .execute_select(&format!("{key} options"), &select)
            .await?;

        let mut options: Vec<String> = table
            .rows()
            .iter()
            .filter_map(|row| row.first())
            .filter(|value| !value.is_null())
            .map(|value| value.to_cell())
            .collect();
        options.sort();
        options.dedup();
        Ok(options)
    }
}
