//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the backing SQLite engine
///
/// These are infrastructure errors: the input was already validated, and
/// this layer never retries them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or initialized
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// SQLite rejected or failed a statement
    #[error("Storage failure: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The caller's selection or sort order is not valid SQL for the pets
    /// table, or its placeholder count does not match its arguments
    #[error("Invalid selection or sort order: {0}")]
    InvalidStatement(#[source] rusqlite::Error),

    /// Another caller panicked while holding the connection
    #[error("Connection lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Open { .. } => "PETDB_STORAGE_UNAVAILABLE",
            StoreError::Sqlite(_) => "PETDB_STORAGE_FAILURE",
            StoreError::LockPoisoned(_) => "PETDB_STORAGE_UNAVAILABLE",
            StoreError::InvalidStatement(_) => "PETDB_INVALID_SELECTION",
        }
    }

    /// Classify a statement error. SQL errors and placeholder mismatches can
    /// only come from caller-supplied fragments; everything else is storage.
    pub(crate) fn from_statement(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::InvalidParameterCount(_, _) => StoreError::InvalidStatement(err),
            rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_ERROR => {
                StoreError::InvalidStatement(err)
            }
            _ => StoreError::Sqlite(err),
        }
    }

    /// True when the statement failed because of the caller's selection or
    /// sort order rather than the storage engine
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self, StoreError::InvalidStatement(_))
    }

    /// True when SQLite refused the write because of a table constraint
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
