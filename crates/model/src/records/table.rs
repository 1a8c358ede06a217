//! The materialized output of one report execution.

use crate::core::{data_type::DataType, value::Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnHeader {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnHeader {
    pub fn new(name: &str, data_type: DataType) -> Self {
        ColumnHeader {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Ordered columns and rows, immutable once built.
///
/// Column headers are always present, even when the query returned no rows,
/// so an empty result can still be rendered and exported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultTable {
    columns: Vec<ColumnHeader>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Builds a table, padding short rows with `Null` and truncating long ones
    /// so every row matches the header width.
    pub fn new(columns: Vec<ColumnHeader>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        ResultTable { columns, rows }
    }

    pub fn empty(columns: Vec<ColumnHeader>) -> Self {
        ResultTable {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnHeader] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Rows as JSON objects keyed by column name, in column order.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(col, value)| (col.name.clone(), value.to_json()))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ResultTable {
        ResultTable::new(
            vec![
                ColumnHeader::new("status", DataType::String),
                ColumnHeader::new("total", DataType::Int),
            ],
            vec![
                vec![Value::from("Pending"), Value::Int(3)],
                vec![Value::from("Completed")],
            ],
        )
    }

    #[test]
    fn test_rows_padded_to_header_width() {
        let table = table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, "total"), Some(&Value::Null));
        assert_eq!(table.get(0, "TOTAL"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_empty_table_keeps_headers() {
        let table = ResultTable::empty(vec![ColumnHeader::new("food_name", DataType::String)]);
        assert!(table.is_empty());
        assert_eq!(table.column_names(), vec!["food_name"]);
        assert_eq!(table.to_json(), serde_json::json!([]));
    }

    #[test]
    fn test_json_preserves_column_names() {
        let json = table().to_json();
        assert_eq!(json[0]["status"], serde_json::json!("Pending"));
        assert_eq!(json[0]["total"], serde_json::json!(3));
        assert_eq!(json[1]["total"], serde_json::Value::Null);
    }
}
