//! Typestate builder for report queries: `select` then `from`, then any
//! optional clauses, then `build`.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::Expr,
    select::{FromClause, JoinClause, OrderByExpr, Select},
};

#[derive(Debug, Default, Clone)]
pub struct InitialState;

#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// Past `FROM`; every remaining clause is optional.
#[derive(Debug, Default, Clone)]
pub struct FromState;

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    _state: State,
}

impl<State> SelectBuilder<State> {
    fn into_state<Next>(self, next: Next) -> SelectBuilder<Next> {
        SelectBuilder {
            ast: self.ast,
            _state: next,
        }
    }
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: InitialState,
        }
    }

    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        self.into_state(SelectState)
    }

    /// `SELECT DISTINCT`, used for filter option lookups.
    pub fn select_distinct(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.distinct = true;
        self.select(columns)
    }
}

impl SelectBuilder<SelectState> {
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        self.into_state(FromState)
    }
}

impl SelectBuilder<FromState> {
    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: Option<&str>, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.map(String::from),
            on,
        });
        self
    }

    /// ANDs `condition` onto any condition set earlier.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.and_where(condition);
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.ast.group_by.push(expr);
        self
    }

    /// Keys apply in call order; later calls break ties of earlier ones.
    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    pub fn limit(mut self, limit: Expr) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::{
            common::{JoinKind, OrderDir, TableRef},
            expr::Expr,
        },
        builder::select::SelectBuilder,
        ident, qualified, value,
    };

    fn table(name: &str) -> TableRef {
        TableRef::new(name)
    }

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![ident("city")])
            .from(table("providers"), None)
            .build();

        assert_eq!(ast.columns, vec![ident("city")]);
        assert_eq!(ast.from.unwrap().table.name, "providers");
        assert!(ast.where_clause.is_none());
        assert!(!ast.distinct);
    }

    #[test]
    fn test_build_with_where_clauses_are_conjoined() {
        let first = Expr::eq(qualified("f", "meal_type"), value(Value::from("Dinner")));
        let second = Expr::is_null(qualified("f", "food_id"));

        let ast = SelectBuilder::new()
            .select(vec![qualified("f", "food_name")])
            .from(table("food_listings"), Some("f"))
            .where_clause(first.clone())
            .where_clause(second.clone())
            .build();

        assert_eq!(ast.from.unwrap().alias, Some("f".to_string()));
        assert_eq!(ast.where_clause, Some(Expr::and(first, second)));
    }

    #[test]
    fn test_build_with_join_grouping_and_ordering() {
        let ast = SelectBuilder::new()
            .select(vec![qualified("r", "name"), qualified("c", "claim_id")])
            .from(table("claims"), Some("c"))
            .join(
                JoinKind::Inner,
                table("receivers"),
                Some("r"),
                Expr::eq(qualified("c", "receiver_id"), qualified("r", "receiver_id")),
            )
            .group_by(qualified("r", "name"))
            .order_by(ident("total_claims"), Some(OrderDir::Desc))
            .build();

        assert_eq!(ast.joins.len(), 1);
        assert_eq!(ast.group_by, vec![qualified("r", "name")]);
        assert_eq!(ast.order_by[0].direction, Some(OrderDir::Desc));
    }

    #[test]
    fn test_build_distinct_with_limit() {
        let ast = SelectBuilder::new()
            .select_distinct(vec![ident("status")])
            .from(table("claims"), None)
            .limit(value(Value::Int(50)))
            .build();

        assert!(ast.distinct);
        assert_eq!(ast.limit, Some(value(Value::Int(50))));
    }
}
