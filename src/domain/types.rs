//! Shared domain types.
//!
//! `Value` is the owned, serializable view of a single dataframe cell. It is
//! what leaves the polars world: summary keys, the profile's head rows, chart
//! positions and workbook cells.

use chrono::NaiveDate;
use polars::prelude::AnyValue;
use serde::Serialize;

/// Days from 0001-01-01 (CE) to 1970-01-01, the epoch polars counts dates from.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A single (nullable) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// Owned copy of a polars cell. Types without a dedicated variant are
    /// kept as their display text.
    pub fn from_any(value: &AnyValue<'_>) -> Value {
        match value {
            AnyValue::Null => Value::Null,
            AnyValue::Int32(v) => Value::Int(i64::from(*v)),
            AnyValue::Int64(v) => Value::Int(*v),
            AnyValue::UInt32(v) => Value::Int(i64::from(*v)),
            AnyValue::UInt64(v) => i64::try_from(*v).map_or(Value::Float(*v as f64), Value::Int),
            AnyValue::Float32(v) => Value::Float(f64::from(*v)),
            AnyValue::Float64(v) => Value::Float(*v),
            AnyValue::Date(days) => {
                NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE).map_or(Value::Null, Value::Date)
            }
            AnyValue::String(s) => Value::Text((*s).to_string()),
            AnyValue::StringOwned(s) => Value::Text(s.to_string()),
            other => Value::Text(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value. NaN floats count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
