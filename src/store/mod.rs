//! # Record Store
//!
//! SQLite-backed storage for pet records.
//!
//! Concurrency control is delegated to SQLite. This layer adds no
//! transactions across calls, no retries and no caching.

mod config;
mod cursor;
mod database;
mod errors;
mod record_store;
mod selection;

pub use config::{
    JournalMode, StoreConfig, DEFAULT_BUSY_TIMEOUT, DEFAULT_CURSOR_WINDOW, MAX_BUSY_TIMEOUT, MEMORY_PATH,
};
pub use cursor::PetCursor;
pub use database::PetDatabase;
pub use errors::{StoreError, StoreResult};
pub use record_store::PetStore;
pub use selection::Selection;
pub use rusqlite::types::Value as SqlValue;
