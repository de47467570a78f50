//! petdb CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Installs the log subscriber
//! 2. Dispatches to CLI commands (via cli::run)
//! 3. Writes a JSON error line on failure
//! 4. Exits with non-zero on failure
//!
//! All logic is delegated to the CLI module.

use petdb::{cli, observability};

fn main() {
    observability::init_logging(observability::DEFAULT_LOG_FILTER);

    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
