//! # HTTP Errors
//!
//! Maps provider failures onto status codes. The JSON body always carries
//! the stable `PETDB_*` code next to the message.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::provider::ProviderError;

/// Result type for HTTP handlers
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP surface errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Routing, validation or storage failure from the provider
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Insert passed validation but storage refused it
    #[error("Failed to insert row for {0}")]
    InsertFailed(String),

    /// Request body is not a JSON document
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Method has no provider operation
    #[error("Method {0} is not supported")]
    MethodNotAllowed(Method),

    /// Blocking worker failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Provider(e) if !e.is_client_error() => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Provider(ProviderError::UnsupportedTarget { .. }) => StatusCode::NOT_FOUND,
            HttpError::Provider(_) => StatusCode::BAD_REQUEST,
            HttpError::InsertFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            HttpError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            HttpError::Provider(e) => e.code(),
            HttpError::InsertFailed(_) => "PETDB_INSERT_FAILED",
            HttpError::InvalidBody(_) => "PETDB_INVALID_BODY",
            HttpError::MethodNotAllowed(_) => "PETDB_METHOD_NOT_ALLOWED",
            HttpError::Internal(_) => "PETDB_INTERNAL",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&HttpError> for ErrorResponse {
    fn from(err: &HttpError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
