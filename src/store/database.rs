//! Lazily opened SQLite handle
//!
//! The connection is opened on first use and then shared for the lifetime of
//! the `PetDatabase`. `rusqlite::Connection` is `Send` but not `Sync`, so it
//! sits behind a mutex held for one statement (or one cursor window) at a
//! time. Isolation and locking between processes are left to SQLite.

use std::sync::Mutex;

use once_cell::sync::OnceCell;
use rusqlite::Connection;

use crate::schema::columns;

use super::config::{StoreConfig, MAX_BUSY_TIMEOUT};
use super::errors::{StoreError, StoreResult};

fn create_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            {id}     INTEGER PRIMARY KEY AUTOINCREMENT,
            {name}   TEXT    NOT NULL CHECK (length({name}) > 0),
            {breed}  TEXT,
            {gender} INTEGER NOT NULL CHECK ({gender} IN (0, 1, 2)),
            {weight} INTEGER NOT NULL DEFAULT 0 CHECK ({weight} >= 0)
        )",
        table = columns::TABLE,
        id = columns::ID,
        name = columns::NAME,
        breed = columns::BREED,
        gender = columns::GENDER,
        weight = columns::WEIGHT,
    )
}

/// The single backing database of a record store
#[derive(Debug)]
pub struct PetDatabase {
    config: StoreConfig,
    conn: OnceCell<Mutex<Connection>>,
}

impl PetDatabase {
    /// Create a handle. Nothing is opened until the first statement runs.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            conn: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// True once the first statement has opened the connection
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Open the connection now instead of on first use.
    pub fn open(&self) -> StoreResult<()> {
        self.connection().map(|_| ())
    }

    /// Run `f` against the shared connection.
    ///
    /// SQL errors raised by `f` are reported as `StoreError::InvalidStatement`.
    pub fn with_connection<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> StoreResult<T> {
        let conn = self
            .connection()?
            .lock()
            .map_err(|_| StoreError::LockPoisoned(operation))?;
        f(&conn).map_err(StoreError::from_statement)
    }

    fn connection(&self) -> StoreResult<&Mutex<Connection>> {
        self.conn
            .get_or_try_init(|| self.open_connection().map(Mutex::new))
    }

    fn open_connection(&self) -> StoreResult<Connection> {
        let config = &self.config;
        let wrap = |source: rusqlite::Error| StoreError::Open {
            path: config.path.clone(),
            source,
        };

        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(wrap)?;

        conn.busy_timeout(config.busy_timeout.min(MAX_BUSY_TIMEOUT))
            .map_err(wrap)?;

        // In-memory databases always report "memory"; the pragma is still
        // issued so the configured mode is honored for files.
        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", config.journal_mode.pragma_value(), |row| {
                row.get(0)
            })
            .map_err(wrap)?;

        conn.execute_batch(&create_table_sql()).map_err(wrap)?;

        tracing::info!(
            event = %crate::observability::Event::StorageOpened,
            path = %config.path.display(),
            journal_mode = %journal_mode,
            "opened pet database"
        );

        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_lazily() {
        let db = PetDatabase::new(StoreConfig::in_memory());
        assert!(!db.is_open());

        let count: i64 = db
            .with_connection("count", |conn| {
                conn.query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))
            })
            .unwrap();
        assert_eq!(count, 0);
        assert!(db.is_open());
    }

    #[test]
    fn test_check_constraints_guard_storage() {
        let db = PetDatabase::new(StoreConfig::in_memory());
        let result = db.with_connection("insert", |conn| {
            conn.execute("INSERT INTO pets (name, gender) VALUES ('Rex', 7)", [])
        });
        let err = result.unwrap_err();
        assert!(err.is_constraint_violation());

        let result = db.with_connection("insert", |conn| {
            conn.execute("INSERT INTO pets (name, gender, weight) VALUES ('Rex', 1, -1)", [])
        });
        assert!(result.unwrap_err().is_constraint_violation());

        let result = db.with_connection("insert", |conn| {
            conn.execute("INSERT INTO pets (name, gender) VALUES ('', 1)", [])
        });
        assert!(result.unwrap_err().is_constraint_violation());
    }

    #[test]
    fn test_oversized_busy_timeout_is_clamped() {
        let mut config = StoreConfig::in_memory();
        config.busy_timeout = std::time::Duration::from_secs(3_000_000);
        let db = PetDatabase::new(config);
        db.open().unwrap();
        assert!(db.is_open());
    }

    #[test]
    fn test_open_failure_reports_path() {
        let db = PetDatabase::new(StoreConfig::new("/nonexistent-dir/definitely/pets.db"));
        let err = db.open().unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
        assert!(!db.is_open());
    }
}
