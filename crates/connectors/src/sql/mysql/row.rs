use crate::sql::base::error::DbError;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use model::core::{data_type::DataType, value::Value};
use mysql_async::{Column, Row, Value as MySqlValue, consts::ColumnType};
use std::str::FromStr;
use tracing::warn;

/// Charset id MySQL reports for binary (non-text) string columns.
const BINARY_CHARSET: u16 = 63;

pub(crate) fn mysql_col_type(column: &Column) -> &'static str {
    let is_binary = column.character_set() == BINARY_CHARSET;
    match column.column_type() {
        ColumnType::MYSQL_TYPE_TINY => "tinyint",
        ColumnType::MYSQL_TYPE_SHORT => "smallint",
        ColumnType::MYSQL_TYPE_INT24 => "mediumint",
        ColumnType::MYSQL_TYPE_LONG => "int",
        ColumnType::MYSQL_TYPE_LONGLONG => "bigint",
        ColumnType::MYSQL_TYPE_YEAR => "year",
        ColumnType::MYSQL_TYPE_FLOAT => "float",
        ColumnType::MYSQL_TYPE_DOUBLE => "double",
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => "decimal",
        ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => "date",
        ColumnType::MYSQL_TYPE_DATETIME
        | ColumnType::MYSQL_TYPE_DATETIME2
        | ColumnType::MYSQL_TYPE_TIMESTAMP
        | ColumnType::MYSQL_TYPE_TIMESTAMP2 => "datetime",
        ColumnType::MYSQL_TYPE_BIT => "bit",
        ColumnType::MYSQL_TYPE_JSON => "json",
        ColumnType::MYSQL_TYPE_ENUM => "enum",
        ColumnType::MYSQL_TYPE_SET => "set",
        ColumnType::MYSQL_TYPE_NULL => "null",
        ColumnType::MYSQL_TYPE_TINY_BLOB
        | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
        | ColumnType::MYSQL_TYPE_LONG_BLOB
        | ColumnType::MYSQL_TYPE_BLOB
        | ColumnType::MYSQL_TYPE_VAR_STRING
        | ColumnType::MYSQL_TYPE_STRING
        | ColumnType::MYSQL_TYPE_VARCHAR => {
            if is_binary {
                "blob"
            } else {
                "varchar"
            }
        }
        _ => "varchar",
    }
}

pub(crate) fn column_data_type(column: &Column) -> DataType {
    let type_name = mysql_col_type(column);
    DataType::from_mysql_type(type_name).unwrap_or_else(|| {
        warn!("Unknown MySQL column type: {}", type_name);
        DataType::String
    })
}

pub(crate) fn row_values(row: Row, types: &[(String, DataType)]) -> Result<Vec<Value>, DbError> {
    row.unwrap()
        .into_iter()
        .zip(types)
        .map(|(raw, (name, data_type))| convert(raw, name, data_type))
        .collect()
}

fn convert(raw: MySqlValue, column: &str, data_type: &DataType) -> Result<Value, DbError> {
    let value = match raw {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Int(i) => match data_type {
            DataType::Boolean => Value::Boolean(i != 0),
            _ => Value::Int(i),
        },
        MySqlValue::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Uint(u),
        },
        MySqlValue::Float(f) => Value::Float(f64::from(f)),
        MySqlValue::Double(d) => Value::Float(d),
        MySqlValue::Date(y, m, d, h, mi, s, us) => {
            let date = NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d))
                .ok_or_else(|| decode_error(column, "invalid date"))?;
            match data_type {
                DataType::Date => Value::Date(date),
                _ => {
                    let ts = date
                        .and_hms_micro_opt(u32::from(h), u32::from(mi), u32::from(s), us)
                        .ok_or_else(|| decode_error(column, "invalid datetime"))?;
                    Value::Timestamp(ts)
                }
            }
        }
        MySqlValue::Time(neg, days, h, m, s, _) => {
            let sign = if neg { "-" } else { "" };
            let hours = days * 24 + u32::from(h);
            Value::String(format!("{sign}{hours:02}:{m:02}:{s:02}"))
        }
        MySqlValue::Bytes(bytes) => from_bytes(bytes, column, data_type)?,
    };
    Ok(value)
}

/// Decimals, text and some temporal values arrive as raw bytes.
fn from_bytes(bytes: Vec<u8>, column: &str, data_type: &DataType) -> Result<Value, DbError> {
    match data_type {
        DataType::Bytes => return Ok(Value::Bytes(bytes)),
        DataType::Boolean => return Ok(Value::Boolean(bytes.iter().any(|b| *b != 0))),
        _ => {}
    }

    let text =
        String::from_utf8(bytes).map_err(|err| decode_error(column, &err.to_string()))?;
    let value = match data_type {
        DataType::Decimal => BigDecimal::from_str(&text)
            .map(Value::Decimal)
            .map_err(|err| decode_error(column, &err.to_string()))?,
        DataType::Int => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|err| decode_error(column, &err.to_string()))?,
        DataType::Float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|err| decode_error(column, &err.to_string()))?,
        DataType::Date => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Value::Date)
            .unwrap_or(Value::String(text)),
        DataType::Timestamp => NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S")
            .map(Value::Timestamp)
            .unwrap_or(Value::String(text)),
        _ => Value::String(text),
    };
    Ok(value)
}

fn decode_error(column: &str, reason: &str) -> DbError {
    DbError::Decode {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_bytes_become_decimal() {
        let value = convert(
            MySqlValue::Bytes(b"12.5000".to_vec()),
            "avg_quantity",
            &DataType::Decimal,
        )
        .unwrap();
        assert_eq!(value, Value::Decimal(BigDecimal::from_str("12.5000").unwrap()));
    }

    #[test]
    fn test_text_and_dates() {
        assert_eq!(
            convert(MySqlValue::Bytes(b"Pending".to_vec()), "status", &DataType::String).unwrap(),
            Value::from("Pending")
        );
        assert_eq!(
            convert(MySqlValue::Date(2025, 3, 17, 0, 0, 0, 0), "expiry_date", &DataType::Date)
                .unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap())
        );
        assert_eq!(
            convert(MySqlValue::NULL, "city", &DataType::String).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_invalid_decimal_is_a_decode_error() {
        let err = convert(MySqlValue::Bytes(b"abc".to_vec()), "total", &DataType::Decimal)
            .unwrap_err();
        assert!(matches!(err, DbError::Decode { ref column, .. } if column == "total"));
    }
}
