use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use chrono::NaiveDateTime;

use crate::db::table::core::value::{DataType, Value};
use crate::error::{Error, Result};

/// One row, values in schema (or projection) order.
#[derive(Debug, PartialEq, Clone)]
#[repr(transparent)]
pub struct Row(pub Vec<Value>);

impl Deref for Row {
    type Target = Vec<Value>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Row {
    /// Reads the value at `index` as a Rust type, the way a driver scans a
    /// column into a variable. Use `Option<T>` for nullable columns.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.0.get(index).ok_or_else(|| Error::ColumnNotFound {
            table: "result".to_string(),
            column: format!("#{}", index),
        })?;
        T::from_value(value)
            .ok_or_else(|| Error::type_mismatch(&format!("#{}", index), T::data_type(), value))
    }
}

/// The primary-key value identifying one row within a table.
///
/// Unlike [`Value`], equality here is exact (no numeric widening, NULL equal
/// to itself) so it can key a hash map. `-0.0` is stored as `0.0`, the two
/// being the same key under SQL comparison.
#[derive(Debug, Clone)]
pub struct RowId(Value);

impl RowId {
    pub fn new(value: Value) -> Self {
        match value {
            Value::Float(f) if f == 0.0 => Self(Value::Float(0.0)),
            value => Self(value),
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl PartialEq for RowId {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }
}

impl Eq for RowId {}

impl Hash for RowId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Integer(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                1u8.hash(state);
                f.to_bits().hash(state);
            }
            Value::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Value::Timestamp(t) => {
                4u8.hash(state);
                t.hash(state);
            }
            Value::Null => {
                5u8.hash(state);
            }
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Text(s) => write!(f, "'{}'", s),
            other => write!(f, "{}", other),
        }
    }
}

/// Conversion from a stored value into a Rust type.
pub trait FromValue: Sized {
    fn data_type() -> DataType;
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn data_type() -> DataType {
        DataType::Integer
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    fn data_type() -> DataType {
        DataType::Integer
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn data_type() -> DataType {
        DataType::Boolean
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for NaiveDateTime {
    fn data_type() -> DataType {
        DataType::Timestamp
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn data_type() -> DataType {
        T::data_type()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
