//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// A bound value. Always rendered as a placeholder, never inlined.
    Value(Value),

    /// A binary operation, e.g., `column = $1` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g., `COUNT(*)` or `SUM(quantity)`.
    FunctionCall(FunctionCall),

    /// An aliased expression, e.g. `COUNT(*) AS total`
    Alias { expr: Box<Expr>, alias: String },

    /// `expr IS NULL`
    IsNull(Box<Expr>),

    /// The current date as the database sees it; spelled per dialect.
    CurrentDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'p' in 'p.city'
    pub name: String,              // e.g., the 'city' in 'p.city'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub wildcard: bool, // represents the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,   // =
    Lt,   // <
    GtEq, // >=
    And,
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }

    pub fn eq(left: Expr, right: Expr) -> Expr {
        Expr::binary(left, BinaryOperator::Eq, right)
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::binary(left, BinaryOperator::And, right)
    }

    pub fn is_null(expr: Expr) -> Expr {
        Expr::IsNull(Box::new(expr))
    }

    /// Folds the conditions left to right with `AND`.
    /// Returns `None` for an empty list.
    pub fn conjunction<I>(conditions: I) -> Option<Expr>
    where
        I: IntoIterator<Item = Expr>,
    {
        conditions.into_iter().reduce(Expr::and)
    }
}
