//! Observable events for petdb
//!
//! Every log line carries one of these as its `event` field, so logs can be
//! filtered on a fixed vocabulary instead of free-form messages.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Backing database opened and table ensured
    StorageOpened,
    /// HTTP listener bound
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Requests
    /// Query dispatched to storage
    QueryReceived,
    /// Request rejected before storage (routing or validation)
    RequestRejected,

    // Writes
    /// Pet row created
    PetInserted,
    /// Storage refused a valid insert
    PetInsertFailed,
    /// Rows updated
    PetsUpdated,
    /// Rows deleted
    PetsDeleted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "PETDB_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StorageOpened => "STORAGE_OPENED",
            Event::Serving => "PETDB_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::QueryReceived => "QUERY_BEGIN",
            Event::RequestRejected => "REQUEST_REJECTED",

            Event::PetInserted => "PET_INSERTED",
            Event::PetInsertFailed => "PET_INSERT_FAILED",
            Event::PetsUpdated => "PETS_UPDATED",
            Event::PetsDeleted => "PETS_DELETED",
        }
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::PetInsertFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
