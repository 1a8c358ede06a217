use crate::query::{
    ast::{
        common::{JoinKind, OrderDir},
        select::{FromClause, JoinClause, OrderByExpr, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        r.push(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        r.list(&self.columns);

        if let Some(from) = &self.from {
            r.push(" ");
            from.render(r);
        }
        for join in &self.joins {
            r.push(" ");
            join.render(r);
        }

        if let Some(cond) = &self.where_clause {
            r.push(" WHERE ");
            cond.render(r);
        }
        if !self.group_by.is_empty() {
            r.push(" GROUP BY ");
            r.list(&self.group_by);
        }
        if !self.order_by.is_empty() {
            r.push(" ORDER BY ");
            r.list(&self.order_by);
        }

        // Placeholders are numbered in render order, so LIMIT binds after
        // every WHERE value.
        if let Some(limit) = &self.limit {
            r.push(" LIMIT ");
            limit.render(r);
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.push("FROM ");
        r.table_with_alias(&self.table, self.alias.as_deref());
    }
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN ",
            JoinKind::Left => "LEFT JOIN ",
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        r.push(self.kind.keyword());
        r.table_with_alias(&self.table, self.alias.as_deref());
        r.push(" ON ");
        self.on.render(r);
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        match self.direction {
            Some(OrderDir::Asc) => r.push(" ASC"),
            Some(OrderDir::Desc) => r.push(" DESC"),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        alias,
        ast::{
            common::{JoinKind, OrderDir, TableRef},
            expr::{BinaryOperator, Expr},
            select::{FromClause, JoinClause, OrderByExpr, Select},
        },
        count_all,
        dialect::{MySql, Postgres, Sqlite},
        ident, qualified,
        renderer::{Render, Renderer},
        value,
    };

    #[test]
    fn test_simple_select_postgres() {
        let ast = Select {
            columns: vec![ident("status"), alias(count_all(), "total")],
            from: Some(FromClause {
                table: TableRef::new("claims"),
                alias: None,
            }),
            where_clause: Some(Expr::eq(ident("status"), value(Value::from("Pending")))),
            group_by: vec![ident("status")],
            ..Default::default()
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(
            sql,
            r#"SELECT "status", COUNT(*) AS "total" FROM "claims" WHERE ("status" = $1) GROUP BY "status""#
        );
        assert_eq!(params, vec![Value::from("Pending")]);
    }

    #[test]
    fn test_simple_select_mysql() {
        let ast = Select {
            distinct: true,
            columns: vec![qualified("p", "city")],
            from: Some(FromClause {
                table: TableRef::new("providers"),
                alias: Some("p".to_string()),
            }),
            ..Default::default()
        };

        let dialect = MySql;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "SELECT DISTINCT `p`.`city` FROM `providers` AS `p`");
        assert!(params.is_empty());
    }

    #[test]
    fn test_clause_order_with_joins_sqlite() {
        let ast = Select {
            distinct: false,
            columns: vec![
                alias(qualified("p", "name"), "provider_name"),
                alias(count_all(), "total_claims"),
            ],
            from: Some(FromClause {
                table: TableRef::new("claims"),
                alias: Some("c".to_string()),
            }),
            joins: vec![
                JoinClause {
                    kind: JoinKind::Inner,
                    table: TableRef::new("food_listings"),
                    alias: Some("f".to_string()),
                    on: Expr::eq(qualified("c", "food_id"), qualified("f", "food_id")),
                },
                JoinClause {
                    kind: JoinKind::Left,
                    table: TableRef::new("providers"),
                    alias: Some("p".to_string()),
                    on: Expr::eq(qualified("f", "provider_id"), qualified("p", "provider_id")),
                },
            ],
            where_clause: Some(Expr::and(
                Expr::binary(
                    qualified("f", "expiry_date"),
                    BinaryOperator::GtEq,
                    Expr::CurrentDate,
                ),
                Expr::eq(qualified("p", "city"), value(Value::from("Austin"))),
            )),
            group_by: vec![qualified("p", "name")],
            order_by: vec![OrderByExpr {
                expr: ident("total_claims"),
                direction: Some(OrderDir::Desc),
            }],
            limit: Some(value(Value::Int(10))),
        };

        let dialect = Sqlite;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql = concat!(
            r#"SELECT "p"."name" AS "provider_name", COUNT(*) AS "total_claims" "#,
            r#"FROM "claims" AS "c" "#,
            r#"INNER JOIN "food_listings" AS "f" ON ("c"."food_id" = "f"."food_id") "#,
            r#"LEFT JOIN "providers" AS "p" ON ("f"."provider_id" = "p"."provider_id") "#,
            r#"WHERE (("f"."expiry_date" >= DATE('now')) AND ("p"."city" = ?)) "#,
            r#"GROUP BY "p"."name" ORDER BY "total_claims" DESC LIMIT ?"#
        );
        assert_eq!(sql, expected_sql);
        assert_eq!(params, vec![Value::from("Austin"), Value::Int(10)]);
    }
}
