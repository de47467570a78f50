//! Mutation payloads
//!
//! `ContentValues` keeps the three states a field can be in apart:
//! absent (no key), present with null, and present with a value. The
//! validator decides which of those are legal for each column.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// A single payload value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Integer(_) => "int",
            FieldValue::Real(_) => "float",
            FieldValue::Text(_) => "string",
        }
    }

    fn from_json(field: &str, value: &Value) -> SchemaResult<Self> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(FieldValue::Integer(i));
                }
                match n.as_f64() {
                    // Integral floats (`12.0`) are accepted for integer columns.
                    // `i64::MAX as f64` rounds up to 2^63, which is out of range.
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(FieldValue::Integer(f as i64))
                    }
                    Some(f) => Ok(FieldValue::Real(f)),
                    None => Err(SchemaError::type_mismatch(field, "number", "unrepresentable number")),
                }
            }
            Value::Array(_) => Err(SchemaError::type_mismatch(field, "scalar", "array")),
            Value::Object(_) => Err(SchemaError::type_mismatch(field, "scalar", "object")),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Real(r) => write!(f, "{}", r),
            FieldValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// An unvalidated set of column writes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    values: BTreeMap<String, FieldValue>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.put(key, value);
        self
    }

    /// Set `key`, replacing any earlier value
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Mark `key` as present with null
    pub fn put_null(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), FieldValue::Null);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert a JSON object into a payload.
    ///
    /// Nested arrays and objects are rejected; every pet column is scalar.
    pub fn from_json(value: &Value) -> SchemaResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            SchemaError::type_mismatch("$root", "object", json_type_name(value))
        })?;

        let mut values = BTreeMap::new();
        for (key, raw) in obj {
            values.insert(key.clone(), FieldValue::from_json(key, raw)?);
        }

        Ok(Self { values })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
