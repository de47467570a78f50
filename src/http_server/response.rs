//! # Response Formatting
//!
//! Every success body names the type of what the path addresses.

use serde::{Deserialize, Serialize};

use crate::schema::Pet;

/// Query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(rename = "type")]
    pub content_type: String,
    pub data: Vec<Pet>,
    pub count: usize,
}

impl ListResponse {
    pub fn new(content_type: &str, data: Vec<Pet>) -> Self {
        let count = data.len();
        Self {
            content_type: content_type.to_string(),
            data,
            count,
        }
    }
}

/// Insert response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    #[serde(rename = "type")]
    pub content_type: String,
    pub id: i64,
    pub uri: String,
}

/// Update and delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsResponse {
    #[serde(rename = "type")]
    pub content_type: String,
    pub rows: usize,
}

impl RowsResponse {
    pub fn new(content_type: &str, rows: usize) -> Self {
        Self {
            content_type: content_type.to_string(),
            rows,
        }
    }
}
