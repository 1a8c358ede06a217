use crate::sql::base::error::DbError;
use chrono::{NaiveDate, NaiveDateTime};
use model::core::value::Value;
use rust_decimal::Decimal as RustDecimal;
use std::str::FromStr;
use tokio_postgres::types::{ToSql, Type};

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Binds `value` as its natural Postgres type. Values Postgres cannot
    /// represent are rejected instead of being truncated.
    pub fn from_value(value: &Value) -> Result<Self, DbError> {
        let param = match value {
            Value::Int(v) => PgParam(Box::new(*v)),
            Value::Uint(v) => {
                let v = i64::try_from(*v).map_err(|_| unbindable(value, "exceeds bigint range"))?;
                PgParam(Box::new(v))
            }
            Value::Float(v) => PgParam(Box::new(*v)),
            Value::Decimal(v) => {
                let decimal = RustDecimal::from_str(&v.to_string())
                    .map_err(|e| unbindable(value, &e.to_string()))?;
                PgParam(Box::new(decimal))
            }
            Value::String(v) => PgParam(Box::new(v.clone())),
            Value::Boolean(v) => PgParam(Box::new(*v)),
            Value::Bytes(v) => PgParam(Box::new(v.clone())),
            Value::Date(v) => PgParam(Box::new(*v)),
            Value::Timestamp(v) => PgParam(Box::new(*v)),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        };
        Ok(param)
    }

    /// Binds `value` as the Rust type the server inferred for its placeholder.
    ///
    /// Postgres refuses an `i64` for an `int4` slot, so integer widths and
    /// textual dates are narrowed here. Anything that does not fit falls back
    /// to [`from_value`](Self::from_value).
    pub fn for_type(value: &Value, ty: &Type) -> Result<Self, DbError> {
        if value.is_null() {
            return Ok(Self::null_of(ty));
        }

        if *ty == Type::INT2 {
            if let Some(v) = value.as_i64().and_then(|v| i16::try_from(v).ok()) {
                return Ok(PgParam(Box::new(v)));
            }
        } else if *ty == Type::INT4 {
            if let Some(v) = value.as_i64().and_then(|v| i32::try_from(v).ok()) {
                return Ok(PgParam(Box::new(v)));
            }
        } else if *ty == Type::INT8 {
            if let Some(v) = value.as_i64() {
                return Ok(PgParam(Box::new(v)));
            }
        } else if *ty == Type::FLOAT4 {
            if let Some(v) = value.as_f64() {
                return Ok(PgParam(Box::new(v as f32)));
            }
        } else if *ty == Type::FLOAT8 {
            if let Some(v) = value.as_f64() {
                return Ok(PgParam(Box::new(v)));
            }
        } else if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
        {
            return Ok(PgParam(Box::new(value.to_cell())));
        } else if *ty == Type::DATE {
            if let Value::String(s) = value {
                if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return Ok(PgParam(Box::new(date)));
                }
            }
        } else if *ty == Type::TIMESTAMP {
            if let Value::String(s) = value {
                if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                    return Ok(PgParam(Box::new(ts)));
                }
            }
        }

        Self::from_value(value)
    }

    fn null_of(ty: &Type) -> Self {
        if *ty == Type::INT2 {
            PgParam(Box::new(Option::<i16>::None))
        } else if *ty == Type::INT4 {
            PgParam(Box::new(Option::<i32>::None))
        } else if *ty == Type::INT8 {
            PgParam(Box::new(Option::<i64>::None))
        } else if *ty == Type::FLOAT8 {
            PgParam(Box::new(Option::<f64>::None))
        } else if *ty == Type::BOOL {
            PgParam(Box::new(Option::<bool>::None))
        } else if *ty == Type::DATE {
            PgParam(Box::new(Option::<NaiveDate>::None))
        } else {
            PgParam(Box::new(Option::<String>::None))
        }
    }
}

fn unbindable(value: &Value, reason: &str) -> DbError {
    DbError::Bind {
        value: value.to_cell(),
        reason: reason.to_string(),
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Pairs each value with the parameter type of a prepared statement.
    pub fn for_statement(values: &[Value], types: &[Type]) -> Result<Self, DbError> {
        let params = values
            .iter()
            .enumerate()
            .map(|(idx, value)| match types.get(idx) {
                Some(ty) => PgParam::for_type(value, ty),
                None => PgParam::from_value(value),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { params })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}
