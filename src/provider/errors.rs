//! # Provider Errors
//!
//! The three failure classes a caller can see:
//! - unsupported target (routing)
//! - validation (caller input)
//! - storage (infrastructure)
//!
//! None of them are retried here.

use std::fmt;

use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Operations a path can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
    GetType,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::GetType => "type",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Path matched no route, or the operation is not legal for the route
    #[error("Cannot {operation} unsupported target {uri}")]
    UnsupportedTarget { operation: Operation, uri: String },

    /// Payload rejected before storage was touched
    #[error("Validation failed: {0}")]
    Validation(#[from] SchemaError),

    /// Storage failed an otherwise valid operation
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ProviderError {
    pub fn unsupported(operation: Operation, uri: impl Into<String>) -> Self {
        ProviderError::UnsupportedTarget {
            operation,
            uri: uri.into(),
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ProviderError::UnsupportedTarget { .. } => "PETDB_UNSUPPORTED_TARGET",
            ProviderError::Validation(e) => e.code().code(),
            ProviderError::Storage(e) => e.code(),
        }
    }

    /// True for errors caused by the caller's input, including a selection
    /// or sort order that storage could not run
    pub fn is_client_error(&self) -> bool {
        match self {
            ProviderError::Storage(e) => e.is_invalid_statement(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = ProviderError::unsupported(Operation::Insert, "/pets/5");
        assert_eq!(err.to_string(), "Cannot insert unsupported target /pets/5");
        assert_eq!(err.code(), "PETDB_UNSUPPORTED_TARGET");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_validation_code_passes_through() {
        let err = ProviderError::from(SchemaError::missing_field("name"));
        assert_eq!(err.code(), "PETDB_MISSING_FIELD");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_storage_is_not_client_error() {
        let err = ProviderError::from(StoreError::LockPoisoned("query"));
        assert!(!err.is_client_error());
        assert_eq!(err.code(), "PETDB_STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_invalid_statement_is_client_error() {
        let err = ProviderError::from(StoreError::InvalidStatement(rusqlite::Error::InvalidParameterCount(0, 1)));
        assert!(err.is_client_error());
        assert_eq!(err.code(), "PETDB_INVALID_SELECTION");
    }
}
