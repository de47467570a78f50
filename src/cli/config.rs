//! Configuration file
//!
//! ```json
//! {
//!   "database_path": "./pets.db",
//!   "cursor_window": 64,
//!   "busy_timeout_ms": 5000,
//!   "journal_mode": "wal",
//!   "http": { "host": "127.0.0.1", "port": 8642 }
//! }
//! ```
//!
//! Only `database_path` is required. `":memory:"` selects a private
//! in-memory database.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::{JournalMode, StoreConfig, DEFAULT_CURSOR_WINDOW, MAX_BUSY_TIMEOUT};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetDbConfig {
    /// SQLite database file (required)
    pub database_path: String,

    /// Rows fetched per cursor window (optional, default 64)
    #[serde(default = "default_cursor_window")]
    pub cursor_window: usize,

    /// SQLite busy timeout in milliseconds (optional, default 5000)
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// SQLite journal mode (optional, default "wal")
    #[serde(default = "default_journal_mode")]
    pub journal_mode: String,

    /// HTTP surface (optional)
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_cursor_window() -> usize {
    DEFAULT_CURSOR_WINDOW
}
fn default_busy_timeout_ms() -> u64 {
    5000
}
fn default_journal_mode() -> String {
    "wal".to_string()
}

impl PetDbConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config {}: {}", path.display(), e)))?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json_str(content: &str) -> CliResult<Self> {
        let config: PetDbConfig = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.cursor_window == 0 {
            return Err(CliError::config_error("cursor_window must be > 0"));
        }

        if self.busy_timeout_ms > MAX_BUSY_TIMEOUT.as_millis() as u64 {
            return Err(CliError::config_error(format!(
                "busy_timeout_ms must be <= {}",
                MAX_BUSY_TIMEOUT.as_millis()
            )));
        }

        self.parsed_journal_mode()?;

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    fn parsed_journal_mode(&self) -> CliResult<JournalMode> {
        JournalMode::parse(&self.journal_mode).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid journal_mode: '{}'. Must be 'wal', 'delete' or 'memory'.",
                self.journal_mode
            ))
        })
    }

    /// Storage settings for the record store
    pub fn to_store_config(&self) -> CliResult<StoreConfig> {
        let mut store = StoreConfig::new(&self.database_path).with_cursor_window(self.cursor_window);
        store.busy_timeout = Duration::from_millis(self.busy_timeout_ms);
        store.journal_mode = self.parsed_journal_mode()?;
        Ok(store)
    }
}
