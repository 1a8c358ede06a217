//! `SELECT` statement AST.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::Expr,
};

/// One `SELECT` statement. Clause order in the rendered SQL is fixed
/// regardless of how the fields were filled in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,
    pub columns: Vec<Expr>,
    pub from: Option<FromClause>,
    pub joins: Vec<JoinClause>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    /// Rendered as a placeholder, like any other value.
    pub limit: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub table: TableRef,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    pub table: TableRef,
    pub alias: Option<String>,
    /// The join condition, e.g., `ON c.food_id = f.food_id`.
    pub on: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<OrderDir>,
}

impl Select {
    /// Every table the query reads, paired with the name it is referenced by
    /// (its alias, or the bare table name when unaliased). FROM comes first.
    pub fn table_bindings(&self) -> Vec<(&str, &TableRef)> {
        let from = self.from.iter().map(|f| (f.alias.as_deref(), &f.table));
        let joins = self.joins.iter().map(|j| (j.alias.as_deref(), &j.table));
        from.chain(joins)
            .map(|(alias, table)| (alias.unwrap_or(table.name.as_str()), table))
            .collect()
    }

    /// Resolves an alias (or bare table name) to the table it binds.
    pub fn resolve_alias(&self, alias: &str) -> Option<&TableRef> {
        self.table_bindings()
            .into_iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, table)| table)
    }

    /// Conjoins `condition` with the existing WHERE clause, existing first.
    pub fn and_where(&mut self, condition: Expr) {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => Expr::and(existing, condition),
            None => condition,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ident, qualified};

    fn joined() -> Select {
        Select {
            columns: vec![ident("name")],
            from: Some(FromClause {
                table: TableRef::new("claims"),
                alias: Some("c".to_string()),
            }),
            joins: vec![JoinClause {
                kind: JoinKind::Inner,
                table: TableRef::new("receivers"),
                alias: None,
                on: Expr::eq(
                    qualified("c", "receiver_id"),
                    qualified("receivers", "receiver_id"),
                ),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_table_bindings_fall_back_to_table_name() {
        let select = joined();
        let names: Vec<&str> = select.table_bindings().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["c", "receivers"]);
        assert_eq!(select.resolve_alias("c").map(|t| t.name.as_str()), Some("claims"));
        assert!(select.resolve_alias("p").is_none());
    }

    #[test]
    fn test_and_where_keeps_existing_condition_first() {
        let mut select = joined();
        let base = Expr::is_null(qualified("c", "claim_id"));
        let extra = Expr::eq(qualified("c", "status"), ident("x"));

        select.and_where(base.clone());
        assert_eq!(select.where_clause, Some(base.clone()));

        select.and_where(extra.clone());
        assert_eq!(select.where_clause, Some(Expr::and(base, extra)));
    }
}
