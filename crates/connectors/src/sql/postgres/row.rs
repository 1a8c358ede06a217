use crate::sql::base::error::DbError;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::core::{data_type::DataType, value::Value};
use rust_decimal::Decimal as RustDecimal;
use std::{error::Error, str::FromStr};
use tokio_postgres::{
    Row,
    types::{FromSql, Kind, Type},
};
use tracing::warn;

/// Label of a user-defined enum. The wire form is the label's UTF-8 text.
struct EnumLabel(String);

impl<'a> FromSql<'a> for EnumLabel {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(EnumLabel(std::str::from_utf8(raw)?.to_owned()))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_))
    }
}

pub(crate) fn column_data_type(ty: &Type) -> DataType {
    DataType::from_postgres_type(ty.name()).unwrap_or_else(|| {
        warn!("Unknown Postgres column type: {}", ty.name());
        DataType::String
    })
}

pub(crate) fn row_values(row: &Row) -> Result<Vec<Value>, DbError> {
    (0..row.len()).map(|idx| cell(row, idx)).collect()
}

fn cell(row: &Row, idx: usize) -> Result<Value, DbError> {
    let column = &row.columns()[idx];
    let ty = column.type_();

    let value = if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)?
            .map(|v| Value::Int(i64::from(v)))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)?
            .map(|v| Value::Int(i64::from(v)))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)?.map(Value::Int)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)?
            .map(|v| Value::Float(f64::from(v)))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)?.map(Value::Float)
    } else if *ty == Type::NUMERIC {
        match row.try_get::<_, Option<RustDecimal>>(idx)? {
            Some(d) => Some(
                BigDecimal::from_str(&d.to_string())
                    .map(Value::Decimal)
                    .map_err(|err| DbError::Decode {
                        column: column.name().to_string(),
                        reason: err.to_string(),
                    })?,
            ),
            None => None,
        }
    } else if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx)?.map(Value::Boolean)
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(idx)?.map(Value::Date)
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(Value::Timestamp)
    } else if *ty == Type::TIMESTAMPTZ {
        row.try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|v| Value::Timestamp(v.naive_utc()))
    } else if *ty == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(idx)?.map(Value::Bytes)
    } else if EnumLabel::accepts(ty) {
        row.try_get::<_, Option<EnumLabel>>(idx)?
            .map(|label| Value::String(label.0))
    } else if <String as FromSql>::accepts(ty) {
        row.try_get::<_, Option<String>>(idx)?.map(Value::String)
    } else {
        return Err(unsupported(column.name(), ty));
    };

    Ok(value.unwrap_or(Value::Null))
}

fn unsupported(column: &str, ty: &Type) -> DbError {
    DbError::Decode {
        column: column.to_string(),
        reason: format!("unsupported Postgres type '{ty}'"),
    }
}
