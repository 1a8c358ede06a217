//! Turns query AST nodes into dialect-specific SQL with bound parameters.

use crate::query::{ast::common::TableRef, dialect::Dialect};
use model::core::value::Value;

pub mod expr;
pub mod select;

pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates SQL text and the values bound to its placeholders.
/// Values never enter the text; each one becomes the dialect's next
/// placeholder.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }

    pub fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    pub fn push_ident(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    pub fn add_param(&mut self, value: Value) {
        let placeholder = self.dialect.get_placeholder(self.params.len());
        self.params.push(value);
        self.sql.push_str(&placeholder);
    }

    /// Renders `items` separated by `", "`.
    pub fn list<T: Render>(&mut self, items: &[T]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self);
        }
    }

    /// `table [AS alias]`
    pub fn table_with_alias(&mut self, table: &TableRef, alias: Option<&str>) {
        self.push_ident(&table.name);
        if let Some(alias) = alias {
            self.sql.push_str(" AS ");
            self.push_ident(alias);
        }
    }
}

/// Renders any node in one call.
pub fn render_sql<T: Render + ?Sized>(node: &T, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    let mut renderer = Renderer::new(dialect);
    node.render(&mut renderer);
    renderer.finish()
}
