use chrono::{Datelike, Timelike};
use model::core::value::Value;
use mysql_async::{Params, Value as MySqlValue};

pub struct MySqlParam(MySqlValue);

impl MySqlParam {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Int(i) => MySqlParam(MySqlValue::Int(*i)),
            Value::Uint(u) => MySqlParam(MySqlValue::UInt(*u)),
            Value::Float(f) => MySqlParam(MySqlValue::Double(*f)),
            Value::Decimal(d) => MySqlParam(MySqlValue::Bytes(d.to_string().into_bytes())),
            Value::String(s) => MySqlParam(MySqlValue::Bytes(s.clone().into_bytes())),
            Value::Boolean(b) => MySqlParam(MySqlValue::Int(i64::from(*b))),
            Value::Bytes(b) => MySqlParam(MySqlValue::Bytes(b.clone())),
            Value::Date(d) => MySqlParam(MySqlValue::Date(
                d.year() as u16,
                d.month() as u8,
                d.day() as u8,
                0,
                0,
                0,
                0,
            )),
            Value::Timestamp(ts) => MySqlParam(MySqlValue::Date(
                ts.year() as u16,
                ts.month() as u8,
                ts.day() as u8,
                ts.hour() as u8,
                ts.minute() as u8,
                ts.second() as u8,
                ts.and_utc().timestamp_subsec_micros(),
            )),
            Value::Null => MySqlParam(MySqlValue::NULL),
        }
    }
}

pub struct MySqlParamStore {
    pub params: Vec<MySqlParam>,
}

impl MySqlParamStore {
    pub fn from_values(values: &[Value]) -> Self {
        let params = values.iter().map(MySqlParam::from_value).collect();
        MySqlParamStore { params }
    }

    pub fn params(&self) -> Params {
        if self.params.is_empty() {
            return Params::Empty;
        }
        let mysql_values: Vec<MySqlValue> = self.params.iter().map(|p| p.0.clone()).collect();
        Params::Positional(mysql_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_string_binds_as_bytes_without_quoting() {
        let store = MySqlParamStore::from_values(&[Value::from("Bob's Pantry"), Value::Int(10)]);
        match store.params() {
            Params::Positional(values) => {
                assert_eq!(values[0], MySqlValue::Bytes(b"Bob's Pantry".to_vec()));
                assert_eq!(values[1], MySqlValue::Int(10));
            }
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn test_date_and_empty_params() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let store = MySqlParamStore::from_values(&[Value::Date(date)]);
        match store.params() {
            Params::Positional(values) => {
                assert_eq!(values[0], MySqlValue::Date(2025, 3, 1, 0, 0, 0, 0));
            }
            other => panic!("unexpected params: {other:?}"),
        }

        assert!(matches!(
            MySqlParamStore::from_values(&[]).params(),
            Params::Empty
        ));
    }
}
