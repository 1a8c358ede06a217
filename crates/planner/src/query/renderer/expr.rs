use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::BinaryOp(op) => op.render(r),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.push(" AS ");
                r.push_ident(alias);
            }
            Expr::IsNull(inner) => {
                r.push("(");
                inner.render(r);
                r.push(" IS NULL)");
            }
            Expr::CurrentDate => {
                let today = r.dialect.current_date();
                r.push(today);
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.push_ident(qualifier);
            r.push(".");
        }
        r.push_ident(&self.name);
    }
}

impl BinaryOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            BinaryOperator::Eq => "=",
            BinaryOperator::Lt => "<",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::And => "AND",
        }
    }
}

/// Always parenthesized, so nested conditions keep their grouping.
impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.push("(");
        self.left.render(r);
        r.push(" ");
        r.push(self.op.as_sql());
        r.push(" ");
        self.right.render(r);
        r.push(")");
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.push(&self.name);
        r.push("(");
        if self.wildcard {
            r.push("*");
        } else {
            r.list(&self.args);
        }
        r.push(")");
    }
}
