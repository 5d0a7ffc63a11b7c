/// Shared types used across the codebase

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Declared type of a column value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    Timestamp,
    /// Any non-null JSON value
    Json,
}

impl ValueType {
    /// Check whether a non-null value is an instance of this type.
    /// Null is never an instance; nullability is a column concern.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ValueType::Float, Value::Number(_)) => true,
            (ValueType::Boolean, Value::Bool(_)) => true,
            (ValueType::Uuid, Value::String(s)) => Uuid::parse_str(s).is_ok(),
            (ValueType::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s).is_ok(),
            (ValueType::Json, _) => true,
            _ => false,
        }
    }

    /// Equality as seen by a column of this type. Float columns compare
    /// numerically so `30` and `30.0` are the same value.
    pub fn same_value(&self, a: &Value, b: &Value) -> bool {
        match (self, a, b) {
            (ValueType::Float, Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
            _ => a == b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Uuid => "uuid",
            ValueType::Timestamp => "timestamp",
            ValueType::Json => "json",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Short JSON kind name for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Primary key of a row; composite keys hold one value per key column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(Vec<Value>);

impl RowId {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for RowId {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}
