//! Validation error types
//!
//! Error codes:
//! - PETDB_MISSING_FIELD
//! - PETDB_NULL_VALUE
//! - PETDB_TYPE_MISMATCH
//! - PETDB_INVALID_VALUE
//! - PETDB_UNDECLARED_FIELD
//! - PETDB_IMMUTABLE_FIELD
//!
//! Every validation error rejects the request before storage is touched.

use std::fmt;

use thiserror::Error;

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Required field absent from the payload
    MissingField,
    /// Field present with null where a value is required
    NullValue,
    /// Field present with the wrong value type
    TypeMismatch,
    /// Field present with a value outside its legal range
    InvalidValue,
    /// Payload key is not a pet column
    UndeclaredField,
    /// Payload tries to write the row id
    ImmutableField,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MissingField => "PETDB_MISSING_FIELD",
            SchemaErrorCode::NullValue => "PETDB_NULL_VALUE",
            SchemaErrorCode::TypeMismatch => "PETDB_TYPE_MISMATCH",
            SchemaErrorCode::InvalidValue => "PETDB_INVALID_VALUE",
            SchemaErrorCode::UndeclaredField => "PETDB_UNDECLARED_FIELD",
            SchemaErrorCode::ImmutableField => "PETDB_IMMUTABLE_FIELD",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which field failed and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field name as it appeared in the payload
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// A payload rejected by validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {details}")]
pub struct SchemaError {
    code: SchemaErrorCode,
    details: ValidationDetails,
}

impl SchemaError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MissingField,
            details: ValidationDetails::new(field, "field to be present", "missing"),
        }
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::NullValue,
            details: ValidationDetails::new(field, "non-null value", "null"),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code: SchemaErrorCode::TypeMismatch,
            details: ValidationDetails::new(field, expected, actual),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            code: SchemaErrorCode::InvalidValue,
            details: ValidationDetails::new(field, expected, actual),
        }
    }

    pub fn undeclared_field(field: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::UndeclaredField,
            details: ValidationDetails::new(field, "a pet column", "undeclared field"),
        }
    }

    pub fn immutable_field(field: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::ImmutableField,
            details: ValidationDetails::new(field, "storage-assigned value", "write attempt"),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the offending field
    pub fn field(&self) -> &str {
        &self.details.field
    }

    /// Returns a human-readable reason, without the field name
    pub fn reason(&self) -> String {
        format!("expected {}, got {}", self.details.expected, self.details.actual)
    }

    /// Returns the full validation details
    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }
}

/// Result type for validation
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::MissingField.code(), "PETDB_MISSING_FIELD");
        assert_eq!(SchemaErrorCode::InvalidValue.code(), "PETDB_INVALID_VALUE");
        assert_eq!(SchemaErrorCode::UndeclaredField.code(), "PETDB_UNDECLARED_FIELD");
    }

    #[test]
    fn test_error_carries_field_and_reason() {
        let err = SchemaError::invalid_value("weight", "non-negative integer", "-3");
        assert_eq!(err.code(), SchemaErrorCode::InvalidValue);
        assert_eq!(err.field(), "weight");
        assert_eq!(err.reason(), "expected non-negative integer, got -3");
    }

    #[test]
    fn test_display_includes_code_and_field() {
        let err = SchemaError::missing_field("name");
        let display = err.to_string();
        assert!(display.contains("PETDB_MISSING_FIELD"));
        assert!(display.contains("'name'"));
    }
}
