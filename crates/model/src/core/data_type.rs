use crate::core::value::Value;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// Logical column type shared by result columns and filter declarations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    Decimal,
    String,
    Boolean,
    Date,
    Timestamp,
    Bytes,
    Null,
}

lazy_static! {
    static ref MYSQL_TYPE_MAP: HashMap<&'static str, DataType> = build_mysql_type_map();
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
}

impl DataType {
    pub fn from_mysql_type(type_name: &str) -> Option<Self> {
        MYSQL_TYPE_MAP
            .get(Self::normalize_type_name(type_name).as_str())
            .copied()
    }

    pub fn from_postgres_type(type_name: &str) -> Option<Self> {
        POSTGRES_TYPE_MAP
            .get(Self::normalize_type_name(type_name).as_str())
            .copied()
    }

    /// SQLite column affinity rules applied to a declared type name.
    pub fn from_sqlite_decl(decl: &str) -> Self {
        let decl = decl.to_ascii_uppercase();
        if decl.contains("INT") {
            DataType::Int
        } else if decl.contains("CHAR") || decl.contains("CLOB") || decl.contains("TEXT") {
            DataType::String
        } else if decl.contains("BLOB") || decl.is_empty() {
            DataType::Bytes
        } else if decl.contains("REAL") || decl.contains("FLOA") || decl.contains("DOUB") {
            DataType::Float
        } else if decl.contains("DATETIME") || decl.contains("TIMESTAMP") {
            DataType::Timestamp
        } else if decl.contains("DATE") {
            DataType::Date
        } else if decl.contains("BOOL") {
            DataType::Boolean
        } else {
            DataType::Decimal
        }
    }

    /// Converts raw user input into a typed value.
    ///
    /// Returns `None` when the text cannot represent a value of this type.
    pub fn parse_value(&self, raw: &str) -> Option<Value> {
        match self {
            DataType::Int => raw.parse::<i64>().ok().map(Value::Int),
            DataType::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Float),
            DataType::Decimal => BigDecimal::from_str(raw).ok().map(Value::Decimal),
            DataType::String => Some(Value::String(raw.to_string())),
            DataType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(Value::Boolean(true)),
                "false" | "0" | "no" => Some(Value::Boolean(false)),
                _ => None,
            },
            DataType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            DataType::Timestamp => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .ok()
                .map(Value::Timestamp),
            DataType::Bytes | DataType::Null => None,
        }
    }

    fn normalize_type_name(type_name: &str) -> String {
        let lower = type_name.trim().to_ascii_lowercase();
        match lower.find('(') {
            Some(idx) => lower[..idx].trim().to_string(),
            None => lower,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Decimal => "decimal",
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::Bytes => "bytes",
            DataType::Null => "null",
        };
        f.write_str(name)
    }
}

fn build_mysql_type_map() -> HashMap<&'static str, DataType> {
    HashMap::from([
        ("tinyint", DataType::Int),
        ("smallint", DataType::Int),
        ("mediumint", DataType::Int),
        ("int", DataType::Int),
        ("integer", DataType::Int),
        ("bigint", DataType::Int),
        ("year", DataType::Int),
        ("float", DataType::Float),
        ("double", DataType::Float),
        ("decimal", DataType::Decimal),
        ("newdecimal", DataType::Decimal),
        ("char", DataType::String),
        ("varchar", DataType::String),
        ("text", DataType::String),
        ("tinytext", DataType::String),
        ("mediumtext", DataType::String),
        ("longtext", DataType::String),
        ("enum", DataType::String),
        ("set", DataType::String),
        ("json", DataType::String),
        ("bit", DataType::Boolean),
        ("date", DataType::Date),
        ("datetime", DataType::Timestamp),
        ("timestamp", DataType::Timestamp),
        ("blob", DataType::Bytes),
        ("tinyblob", DataType::Bytes),
        ("mediumblob", DataType::Bytes),
        ("longblob", DataType::Bytes),
        ("binary", DataType::Bytes),
        ("varbinary", DataType::Bytes),
        ("null", DataType::Null),
    ])
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    HashMap::from([
        ("int2", DataType::Int),
        ("int4", DataType::Int),
        ("int8", DataType::Int),
        ("smallint", DataType::Int),
        ("integer", DataType::Int),
        ("bigint", DataType::Int),
        ("float4", DataType::Float),
        ("float8", DataType::Float),
        ("real", DataType::Float),
        ("double precision", DataType::Float),
        ("numeric", DataType::Decimal),
        ("decimal", DataType::Decimal),
        ("text", DataType::String),
        ("varchar", DataType::String),
        ("bpchar", DataType::String),
        ("name", DataType::String),
        ("character varying", DataType::String),
        ("bool", DataType::Boolean),
        ("boolean", DataType::Boolean),
        ("date", DataType::Date),
        ("timestamp", DataType::Timestamp),
        ("timestamptz", DataType::Timestamp),
        ("bytea", DataType::Bytes),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_lookup() {
        assert_eq!(DataType::from_mysql_type("VARCHAR(255)"), Some(DataType::String));
        assert_eq!(DataType::from_mysql_type("newdecimal"), Some(DataType::Decimal));
        assert_eq!(DataType::from_postgres_type("int8"), Some(DataType::Int));
        assert_eq!(DataType::from_postgres_type("numeric"), Some(DataType::Decimal));
        assert_eq!(DataType::from_postgres_type("tsvector"), None);
    }

    #[test]
    fn test_sqlite_affinity() {
        assert_eq!(DataType::from_sqlite_decl("INTEGER"), DataType::Int);
        assert_eq!(DataType::from_sqlite_decl("VARCHAR(45)"), DataType::String);
        assert_eq!(DataType::from_sqlite_decl("DATE"), DataType::Date);
        assert_eq!(DataType::from_sqlite_decl("REAL"), DataType::Float);
        assert_eq!(DataType::from_sqlite_decl(""), DataType::Bytes);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(DataType::Int.parse_value("12"), Some(Value::Int(12)));
        assert_eq!(DataType::Int.parse_value("twelve"), None);
        assert_eq!(
            DataType::String.parse_value("Chicago"),
            Some(Value::String("Chicago".into()))
        );
        assert_eq!(
            DataType::Date.parse_value("2025-02-28"),
            Some(Value::Date(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()))
        );
        assert_eq!(DataType::Date.parse_value("2025-02-30"), None);
        assert_eq!(DataType::Float.parse_value("NaN"), None);
        assert_eq!(DataType::Boolean.parse_value("YES"), Some(Value::Boolean(true)));
    }
}
