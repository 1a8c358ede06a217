use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use model::core::{data_type::DataType, value::Value};
use rusqlite::types::ValueRef;
use std::str::FromStr;

/// Converts one SQLite cell, using the declared column type when the
/// column maps straight onto a table column.
pub(crate) fn cell(raw: ValueRef<'_>, declared: Option<DataType>) -> Value {
    match raw {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => match declared {
            Some(DataType::Boolean) => Value::Boolean(i != 0),
            _ => Value::Int(i),
        },
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            match declared {
                Some(DataType::Date) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                    .map(Value::Date)
                    .unwrap_or(Value::String(text)),
                Some(DataType::Timestamp) => {
                    NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S")
                        .map(Value::Timestamp)
                        .unwrap_or(Value::String(text))
                }
                Some(DataType::Decimal) => BigDecimal::from_str(&text)
                    .map(Value::Decimal)
                    .unwrap_or(Value::String(text)),
                _ => Value::String(text),
            }
        }
    }
}

/// Header type for a result column. Computed columns carry no declared type,
/// so the first non-null value decides.
pub(crate) fn header_type(declared: Option<DataType>, rows: &[Vec<Value>], idx: usize) -> DataType {
    declared.unwrap_or_else(|| {
        rows.iter()
            .filter_map(|row| row.get(idx))
            .find(|value| !value.is_null())
            .map(Value::data_type)
            .unwrap_or(DataType::String)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_date_text_becomes_date() {
        let value = cell(ValueRef::Text(b"2025-03-17"), Some(DataType::Date));
        assert_eq!(
            value,
            Value::Date(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap())
        );

        let untyped = cell(ValueRef::Text(b"2025-03-17"), None);
        assert_eq!(untyped, Value::from("2025-03-17"));
    }

    #[test]
    fn test_header_type_falls_back_to_values() {
        let rows = vec![vec![Value::Null], vec![Value::Int(4)]];
        assert_eq!(header_type(None, &rows, 0), DataType::Int);
        assert_eq!(header_type(None, &[], 0), DataType::String);
        assert_eq!(header_type(Some(DataType::Date), &rows, 0), DataType::Date);
    }
}
