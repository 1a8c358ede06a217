use crate::{catalog::schema, error::ReportError, filter::keys::FilterColumn};
use planner::query::ast::{common::TableRef, select::Select};
use std::collections::HashSet;

/// A named report: its base `SELECT` plus the filters it accepts.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    name: String,
    select: Select,
    filters: Vec<FilterColumn>,
}

impl ReportQuery {
    pub fn new(name: &str, select: Select, filters: &[FilterColumn]) -> Self {
        Self {
            name: name.to_string(),
            select,
            filters: filters.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    /// Declared filters, in the order their predicates are emitted.
    pub fn filters(&self) -> &[FilterColumn] {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> Option<&FilterColumn> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Tables reachable from the FROM and JOIN clauses.
    pub fn tables(&self) -> Vec<&TableRef> {
        self.select
            .table_bindings()
            .into_iter()
            .map(|(_, table)| table)
            .collect()
    }

    /// Every filter must resolve to a joined table that owns the column.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.select.from.is_none() {
            return Err(ReportError::Catalog(format!(
                "report '{}' has no FROM clause",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for filter in &self.filters {
            if !seen.insert(filter.key) {
                return Err(ReportError::Catalog(format!(
                    "report '{}' declares filter '{}' twice",
                    self.name, filter.key
                )));
            }

            let table = self.select.resolve_alias(filter.qualifier).ok_or_else(|| {
                ReportError::Catalog(format!(
                    "report '{}': filter '{}' refers to alias '{}' which is not joined",
                    self.name, filter.key, filter.qualifier
                ))
            })?;

            if table.name != filter.table || !schema::has_column(&table.name, filter.column) {
                return Err(ReportError::Catalog(format!(
                    "report '{}': filter '{}' expects {}.{} but alias '{}' is '{}'",
                    self.name, filter.key, filter.table, filter.column, filter.qualifier, table.name
                )));
            }
        }

        Ok(())
    }
}
