use model::core::value::Value;
use rusqlite::types::Value as SqlValue;

/// SQLite stores dates as ISO-8601 text, so temporal values bind as text in
/// the same format the tables use.
pub fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Uint(u) => match i64::try_from(*u) {
            Ok(i) => SqlValue::Integer(i),
            Err(_) => SqlValue::Text(u.to_string()),
        },
        Value::Float(f) => SqlValue::Real(*f),
        Value::Boolean(b) => SqlValue::Integer(i64::from(*b)),
        Value::Bytes(b) => SqlValue::Blob(b.clone()),
        Value::Null => SqlValue::Null,
        Value::Decimal(_) | Value::String(_) | Value::Date(_) | Value::Timestamp(_) => {
            SqlValue::Text(value.to_cell())
        }
    }
}

pub struct SqliteParamStore {
    pub params: Vec<SqlValue>,
}

impl SqliteParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            params: values.iter().map(to_sql_value).collect(),
        }
    }
}
