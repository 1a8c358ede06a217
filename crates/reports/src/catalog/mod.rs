use crate::error::ReportError;
use lazy_static::lazy_static;
use std::{collections::HashSet, sync::Arc};

pub mod definitions;
pub mod query;
pub mod schema;

use query::ReportQuery;

lazy_static! {
    static ref DEFAULT_CATALOG: Result<Arc<ReportCatalog>, String> =
        ReportCatalog::new(definitions::default_reports())
            .map(Arc::new)
            .map_err(|e| e.to_string());
}

/// Immutable registry of reports, kept in registration order.
#[derive(Debug, Clone)]
pub struct ReportCatalog {
    reports: Vec<ReportQuery>,
}

impl ReportCatalog {
    pub fn new(reports: Vec<ReportQuery>) -> Result<Self, ReportError> {
        let mut names = HashSet::new();
        for report in &reports {
            if !names.insert(report.name()) {
                return Err(ReportError::Catalog(format!(
                    "duplicate report name '{}'",
                    report.name()
                )));
            }
            report.validate()?;
        }
        Ok(Self { reports })
    }

    /// The built-in reports, constructed on first use.
    pub fn global() -> Result<Arc<ReportCatalog>, ReportError> {
        DEFAULT_CATALOG
            .as_ref()
            .map(Arc::clone)
            .map_err(|msg| ReportError::Catalog(msg.clone()))
    }

    pub fn list_query_names(&self) -> Vec<String> {
        self.reports.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Result<&ReportQuery, ReportError> {
        self.reports
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| ReportError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportQuery> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::keys::{CITY, CLAIM_STATUS, FilterColumn};
    use planner::query::{
        ast::common::TableRef, builder::select::SelectBuilder, ident, qualified,
    };

    fn providers_report(name: &str, filters: &[FilterColumn]) -> ReportQuery {
        let select = SelectBuilder::new()
            .select(vec![qualified("p", "name")])
            .from(TableRef::new("providers"), Some("p"))
            .build();
        ReportQuery::new(name, select, filters)
    }

    #[test]
    fn test_global_catalog_lists_reports_in_order() {
        let catalog = ReportCatalog::global().unwrap();
        let names = catalog.list_query_names();

        assert_eq!(names.len(), 15);
        assert_eq!(names[0], definitions::TOTAL_CLAIMS_PER_PROVIDER);
        assert_eq!(names[2], definitions::CLAIMS_BY_STATUS);
        assert_eq!(names[14], definitions::RECEIVERS_WITHOUT_CLAIMS);
    }

    #[test]
    fn test_every_filter_resolves_to_a_joined_column() {
        let catalog = ReportCatalog::global().unwrap();
        for report in catalog.iter() {
            for filter in report.filters() {
                let table = report
                    .select()
                    .resolve_alias(filter.qualifier)
                    .unwrap_or_else(|| panic!("{}: {} not joined", report.name(), filter.key));
                assert!(report.tables().contains(&table));
                assert!(schema::has_column(&table.name, filter.column));
            }
        }
    }

    #[test]
    fn test_get_unknown_report_is_not_found() {
        let catalog = ReportCatalog::global().unwrap();
        assert!(catalog.get(definitions::CLAIMS_BY_STATUS).is_ok());
        assert!(matches!(
            catalog.get("Claims by Statuses"),
            Err(ReportError::NotFound(name)) if name == "Claims by Statuses"
        ));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = ReportCatalog::new(vec![
            providers_report("Providers", &[]),
            providers_report("Providers", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, ReportError::Catalog(_)));
    }

    #[test]
    fn test_rejects_filter_on_missing_join() {
        let err = ReportCatalog::new(vec![providers_report("Providers", &[CITY, CLAIM_STATUS])])
            .unwrap_err();
        assert!(matches!(err, ReportError::Catalog(msg) if msg.contains("claim_status")));
    }

    #[test]
    fn test_rejects_filter_alias_bound_to_other_table() {
        let select = SelectBuilder::new()
            .select(vec![ident("name")])
            .from(TableRef::new("receivers"), Some("p"))
            .build();
        let err = ReportCatalog::new(vec![ReportQuery::new("Receivers", select, &[CITY])])
            .unwrap_err();
        assert!(matches!(err, ReportError::Catalog(_)));
    }
}
