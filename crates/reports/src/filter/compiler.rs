use crate::{
    catalog::query::ReportQuery,
    error::ReportError,
    filter::{keys, spec::FilterSpec},
};
use model::core::value::Value;
use planner::query::ast::{
    expr::{BinaryOperator, Expr, Ident},
    select::Select,
};

/// Longest filter value accepted, in characters.
pub const MAX_VALUE_LEN: usize = 256;

/// One `column <op> $param` comparison. `param` indexes
/// [`CompiledPredicate::params`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Ident,
    pub op: BinaryOperator,
    pub param: usize,
}

/// Validated filters for one report, ready to be merged into its `WHERE`.
/// Only [`FilterCompiler`] builds one, so every `param` index is in range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledPredicate {
    predicates: Vec<Predicate>,
    params: Vec<Value>,
}

impl CompiledPredicate {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    fn push(&mut self, column: Ident, value: Value) {
        self.predicates.push(Predicate {
            column,
            op: BinaryOperator::Eq,
            param: self.params.len(),
        });
        self.params.push(value);
    }

    /// The predicates as one conjunction. Values stay as `Expr::Value` so the
    /// renderer binds them as parameters.
    pub fn condition(&self) -> Option<Expr> {
        Expr::conjunction(self.predicates.iter().filter_map(|p| {
            let value = self.params.get(p.param)?;
            Some(Expr::binary(
                Expr::Identifier(p.column.clone()),
                p.op,
                Expr::Value(value.clone()),
            ))
        }))
    }

    /// Returns `select` with the predicates ANDed after its own condition.
    pub fn apply(&self, select: &Select) -> Select {
        let mut composed = select.clone();
        if let Some(condition) = self.condition() {
            composed.and_where(condition);
        }
        composed
    }
}

pub struct FilterCompiler;

impl FilterCompiler {
    /// Checks every filter against the report and types its value.
    ///
    /// Unknown keys fail whatever their value. A known filter the report does
    /// not declare is accepted only when set to "no filter", since callers
    /// send all four dropdowns for every report.
    ///
    /// Predicates follow the report's declared filter order, independent of
    /// the order the caller supplied them in.
    pub fn compile(report: &ReportQuery, spec: &FilterSpec) -> Result<CompiledPredicate, ReportError> {
        for key in spec.keys() {
            if keys::lookup(key).is_none() {
                return Err(ReportError::invalid_filter(
                    key,
                    format!("unknown filter (expected one of: {})", keys::keys().join(", ")),
                ));
            }
        }
        for (key, _) in spec.active() {
            if report.filter(key).is_none() {
                return Err(ReportError::invalid_filter(
                    key,
                    format!("not available for report '{}'", report.name()),
                ));
            }
        }

        let mut compiled = CompiledPredicate::default();
        for filter in report.filters() {
            let Some((_, raw)) = spec.active().find(|(key, _)| *key == filter.key) else {
                continue;
            };

            check_text(filter.key, raw)?;
            let value = filter.data_type.parse_value(raw).ok_or_else(|| {
                ReportError::invalid_filter(filter.key, format!("'{raw}' is not a valid {}", filter.data_type))
            })?;

            compiled.push(
                Ident {
                    qualifier: Some(filter.qualifier.to_string()),
                    name: filter.column.to_string(),
                },
                value,
            );
        }

        Ok(compiled)
    }
}

fn check_text(key: &str, raw: &str) -> Result<(), ReportError> {
    if raw.chars().count() > MAX_VALUE_LEN {
        return Err(ReportError::invalid_filter(
            key,
            format!("value longer than {MAX_VALUE_LEN} characters"),
        ));
    }
    if raw.chars().any(char::is_control) {
        return Err(ReportError::invalid_filter(key, "value contains control characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ReportCatalog, definitions};
    use planner::query::{dialect::Postgres, renderer::render_sql};

    fn report(name: &str) -> ReportQuery {
        ReportCatalog::global().unwrap().get(name).unwrap().clone()
    }

    #[test]
    fn test_predicates_follow_declared_order() {
        let report = report(definitions::TOTAL_CLAIMS_PER_PROVIDER);
        let spec = FilterSpec::new()
            .with("claim_status", Some("Completed"))
            .with("city", Some("Austin"))
            .with("meal_type", Some("(All)"));

        let compiled = FilterCompiler::compile(&report, &spec).unwrap();

        let columns: Vec<_> = compiled
            .predicates()
            .iter()
            .map(|p| (p.column.qualifier.clone().unwrap(), p.column.name.clone(), p.param))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("p".to_string(), "city".to_string(), 0),
                ("c".to_string(), "status".to_string(), 1)
            ]
        );
        assert_eq!(compiled.params(), &[Value::from("Austin"), Value::from("Completed")]);
    }

    #[test]
    fn test_undeclared_key_is_rejected() {
        let report = report(definitions::TOP_CITIES_BY_PROVIDERS);
        let spec = FilterSpec::new().with("city", Some("Chicago"));

        let err = FilterCompiler::compile(&report, &spec).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFilter { ref key, .. } if key == "city"));

        let unknown = FilterSpec::new().with("donor", Some("x"));
        let err = FilterCompiler::compile(&report, &unknown).unwrap_err();
        assert!(err.to_string().contains("unknown filter"));
    }

    #[test]
    fn test_sentinel_on_undeclared_key_is_ignored() {
        let report = report(definitions::TOP_CITIES_BY_PROVIDERS);
        let spec = FilterSpec::new().with("city", Some("(All)"));

        let compiled = FilterCompiler::compile(&report, &spec).unwrap();
        assert!(compiled.is_empty());
        assert!(compiled.params().is_empty());

        let blank = FilterSpec::new().with("city", Some(""));
        assert!(FilterCompiler::compile(&report, &blank).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_key_rejected_even_without_value() {
        let report = report(definitions::TOP_CITIES_BY_PROVIDERS);

        for selection in [Some("(All)"), Some(""), None] {
            let spec = FilterSpec::new().with("citty", selection);
            let err = FilterCompiler::compile(&report, &spec).unwrap_err();
            assert!(matches!(err, ReportError::InvalidFilter { ref key, .. } if key == "citty"));
            assert!(err.to_string().contains("unknown filter"));
        }
    }

    #[test]
    fn test_value_limits() {
        let report = report(definitions::CLAIMS_BY_STATUS);

        let long = "x".repeat(MAX_VALUE_LEN + 1);
        let spec = FilterSpec::new().with("claim_status", Some(&long));
        assert!(FilterCompiler::compile(&report, &spec).is_err());

        let exact = "x".repeat(MAX_VALUE_LEN);
        let spec = FilterSpec::new().with("claim_status", Some(&exact));
        assert!(FilterCompiler::compile(&report, &spec).is_ok());

        let spec = FilterSpec::new().with("claim_status", Some("Pend\u{0}ing"));
        assert!(FilterCompiler::compile(&report, &spec).is_err());
    }

    #[test]
    fn test_applied_filters_follow_base_condition() {
        let report = report(definitions::EXPIRED_LISTINGS);
        let spec = FilterSpec::new().with("city", Some("x' OR '1'='1"));

        let compiled = FilterCompiler::compile(&report, &spec).unwrap();
        let (sql, params) = render_sql(&compiled.apply(report.select()), &Postgres);

        assert_eq!(
            sql,
            concat!(
                r#"SELECT "f"."food_name", "f"."expiry_date", "p"."name" AS "provider_name" "#,
                r#"FROM "food_listings" AS "f" "#,
                r#"INNER JOIN "providers" AS "p" ON ("f"."provider_id" = "p"."provider_id") "#,
                r#"WHERE (("f"."expiry_date" < CURRENT_DATE) AND ("p"."city" = $1))"#
            )
        );
        assert!(!sql.contains("OR '1'"));
        assert_eq!(params, vec![Value::from("x' OR '1'='1")]);
    }

    #[test]
    fn test_every_predicate_indexes_a_bound_value() {
        let report = report(definitions::TOTAL_CLAIMS_PER_PROVIDER);
        let spec = FilterSpec::new()
            .with("city", Some("Austin"))
            .with("meal_type", Some("Dinner"));

        let compiled = FilterCompiler::compile(&report, &spec).unwrap();
        assert_eq!(compiled.predicates().len(), compiled.params().len());
        for predicate in compiled.predicates() {
            assert!(predicate.param < compiled.params().len());
        }

        let (sql, params) = render_sql(&compiled.apply(report.select()), &Postgres);
        assert!(sql.contains("$2"));
        assert_eq!(params, vec![Value::from("Austin"), Value::from("Dinner")]);

        assert!(CompiledPredicate::default().condition().is_none());
    }
}
