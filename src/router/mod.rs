//! # Resource Router
//!
//! Maps incoming resource identifiers to route codes.
//!
//! Routes are registered as slash-separated patterns. Each segment is one of:
//! - a literal (`pets`)
//! - `#`, matching a single numeric segment
//! - `*`, matching any single segment
//!
//! Matching is structural only: the router never looks at what a segment
//! refers to, only at its shape.

mod matcher;
mod uri;

pub use matcher::UriMatcher;
pub use uri::ContentUri;
