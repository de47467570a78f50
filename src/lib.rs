//! petdb - pet records behind a URI router
//!
//! Call chain: caller -> provider -> router -> validator -> store -> SQLite.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod provider;
pub mod router;
pub mod schema;
pub mod store;
