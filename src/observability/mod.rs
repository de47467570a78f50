//! Observability for petdb
//!
//! Structured logging through `tracing`:
//! - one JSON object per line, written to stderr
//! - every line carries an `event` field from [`Event`]
//! - level filtering through `RUST_LOG`
//!
//! stdout is reserved for command output, so logs never interleave with it.
//!
//! # Usage
//!
//! ```ignore
//! use petdb::observability::{self, Event};
//!
//! observability::init_logging("info");
//! observability::log_event(Event::BootStart);
//! tracing::info!(event = %Event::PetsDeleted, rows = 3, "deleted pets");
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global JSON subscriber.
///
/// Safe to call more than once; later calls are ignored. Logging failure must
/// never stop the process, so errors are swallowed.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log a lifecycle event without extra fields
pub fn log_event(event: Event) {
    if event.is_failure() {
        tracing::error!(event = %event);
    } else {
        tracing::info!(event = %event);
    }
}
