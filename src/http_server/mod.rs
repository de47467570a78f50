//! # petdb HTTP Server Module
//!
//! Exposes the pets provider over HTTP. Paths are matched by the provider's
//! router, so `/pets` and `/pets/{id}` behave exactly as they do through the
//! CLI.
//!
//! # Status codes
//!
//! - `404` - path matched no route, or the operation is not legal there
//! - `400` - payload failed validation or was not JSON
//! - `500` - storage failure, including a refused insert

mod config;
mod errors;
mod handler;
mod response;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use handler::SelectionParams;
pub use response::{InsertResponse, ListResponse, RowsResponse};
pub use server::{build_router, HttpServer};
