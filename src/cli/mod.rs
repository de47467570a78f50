//! CLI module for petdb
//!
//! Provides command-line interface for:
//! - init: Open the database and create the pets table
//! - query / insert / update / delete / type: One-shot provider operations
//! - serve: HTTP surface over the same provider

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, SelectionArgs};
pub use commands::{execute, run, run_command, serve};
pub use config::PetDbConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request_from, write_error, write_response};
