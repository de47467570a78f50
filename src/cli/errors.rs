//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code after one
//! `{"status":"error"}` line has been written.

use std::io;

use thiserror::Error;

use crate::provider::ProviderError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Storage refused a valid insert
    InsertFailed,
    /// HTTP server could not start or stopped with an error
    ServeFailed,
    /// The provider rejected the request; carries its code
    Request(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PETDB_CLI_CONFIG_ERROR",
            Self::IoError => "PETDB_CLI_IO_ERROR",
            Self::InsertFailed => "PETDB_INSERT_FAILED",
            Self::ServeFailed => "PETDB_CLI_SERVE_FAILED",
            Self::Request(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {}", .code.code(), .message)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Insert passed validation but was not stored
    pub fn insert_failed(uri: &str) -> Self {
        Self::new(
            CliErrorCode::InsertFailed,
            format!("Failed to insert row for {}", uri),
        )
    }

    /// HTTP server failure
    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        Self::new(CliErrorCode::Request(e.code()), e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
