//! Storage configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path that selects a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Default number of rows a cursor fetches per window
pub const DEFAULT_CURSOR_WINDOW: usize = 64;

/// Default time SQLite waits on a locked database
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Longest busy timeout SQLite accepts (`i32::MAX` milliseconds)
pub const MAX_BUSY_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// SQLite journal mode
///
/// Values map 1:1 to the `journal_mode` pragma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    Wal,
    Delete,
    Memory,
}

impl JournalMode {
    /// Returns the pragma value
    pub const fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "wal",
            JournalMode::Delete => "delete",
            JournalMode::Memory => "memory",
        }
    }

    /// Parse a configured journal mode (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "wal" => Some(JournalMode::Wal),
            "delete" => Some(JournalMode::Delete),
            "memory" => Some(JournalMode::Memory),
            _ => None,
        }
    }
}

/// How the record store opens its backing database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub cursor_window: usize,
    pub busy_timeout: Duration,
    pub journal_mode: JournalMode,
}

impl StoreConfig {
    /// Defaults for a database file at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cursor_window: DEFAULT_CURSOR_WINDOW,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            journal_mode: JournalMode::Wal,
        }
    }

    /// A private in-memory database
    pub fn in_memory() -> Self {
        Self {
            journal_mode: JournalMode::Memory,
            ..Self::new(MEMORY_PATH)
        }
    }

    pub fn with_cursor_window(mut self, window: usize) -> Self {
        self.cursor_window = window.max(1);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == Path::new(MEMORY_PATH)
    }
}
