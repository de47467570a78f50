//! # Request Dispatch
//!
//! One fallback handler receives every request; the path goes to the
//! provider's router untouched and the method picks the operation:
//!
//! | Method         | Operation |
//! |----------------|-----------|
//! | `GET`          | query     |
//! | `POST`         | insert    |
//! | `PUT`, `PATCH` | update    |
//! | `DELETE`       | delete    |
//!
//! Provider calls block on SQLite, so they run on Tokio's blocking pool.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::provider::{InsertOutcome, PetProvider, ProviderError};
use crate::schema::ContentValues;
use crate::store::Selection;

use super::errors::{HttpError, HttpResult};
use super::response::{InsertResponse, ListResponse, RowsResponse};

/// Query string accepted by every method
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionParams {
    /// SQL WHERE fragment with `?` placeholders
    #[serde(rename = "where")]
    pub clause: Option<String>,
    /// Comma-separated values for the placeholders
    pub args: Option<String>,
    /// SQL ORDER BY fragment
    pub sort: Option<String>,
}

impl SelectionParams {
    pub fn to_selection(&self) -> Option<Selection> {
        let clause = self.clause.as_ref()?;
        let args = self
            .args
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(|a| a.split(',').collect::<Vec<_>>())
            .unwrap_or_default();
        Some(Selection::with_text_args(clause.clone(), args))
    }
}

pub(crate) async fn dispatch(
    State(provider): State<Arc<PetProvider>>,
    method: Method,
    uri: Uri,
    Query(params): Query<SelectionParams>,
    body: Bytes,
) -> HttpResult<Response> {
    let path = uri.path().to_string();

    match method {
        Method::GET => run_blocking(move || query(&provider, &path, &params)).await,
        Method::POST => run_blocking(move || insert(&provider, &path, &body)).await,
        Method::PUT | Method::PATCH => {
            run_blocking(move || update(&provider, &path, &params, &body)).await
        }
        Method::DELETE => run_blocking(move || delete(&provider, &path, &params)).await,
        other => Err(HttpError::MethodNotAllowed(other)),
    }
}

async fn run_blocking<F>(f: F) -> HttpResult<Response>
where
    F: FnOnce() -> HttpResult<Response> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| HttpError::Internal(format!("worker task failed: {}", e)))?
}

fn query(provider: &PetProvider, path: &str, params: &SelectionParams) -> HttpResult<Response> {
    let selection = params.to_selection();
    let pets = provider
        .query(path, selection.as_ref(), params.sort.as_deref())?
        .collect_all()
        .map_err(ProviderError::from)?;

    let body = ListResponse::new(provider.get_type(path)?, pets);
    Ok(Json(body).into_response())
}

fn insert(provider: &PetProvider, path: &str, body: &[u8]) -> HttpResult<Response> {
    let values = payload(body)?;

    match provider.insert(path, &values)? {
        InsertOutcome::Created { id, uri } => {
            let location = uri.to_string();
            let body = InsertResponse {
                content_type: provider.get_type(&location)?.to_string(),
                id,
                uri: location.clone(),
            };
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
        }
        InsertOutcome::Failed => Err(HttpError::InsertFailed(path.to_string())),
    }
}

fn update(
    provider: &PetProvider,
    path: &str,
    params: &SelectionParams,
    body: &[u8],
) -> HttpResult<Response> {
    let values = payload(body)?;
    let selection = params.to_selection();
    let rows = provider.update(path, &values, selection.as_ref())?;

    Ok(Json(RowsResponse::new(provider.get_type(path)?, rows)).into_response())
}

fn delete(provider: &PetProvider, path: &str, params: &SelectionParams) -> HttpResult<Response> {
    let selection = params.to_selection();
    let rows = provider.delete(path, selection.as_ref())?;

    Ok(Json(RowsResponse::new(provider.get_type(path)?, rows)).into_response())
}

fn payload(body: &[u8]) -> HttpResult<ContentValues> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| HttpError::InvalidBody(e.to_string()))?;
    Ok(ContentValues::from_json(&value).map_err(ProviderError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_params() {
        let params = SelectionParams {
            clause: Some("name = ? OR name = ?".into()),
            args: Some("Rex,Tom".into()),
            sort: None,
        };
        let selection = params.to_selection().unwrap();
        assert_eq!(selection.args().len(), 2);

        let params = SelectionParams {
            clause: Some("weight > 3".into()),
            args: Some(String::new()),
            sort: None,
        };
        assert!(params.to_selection().unwrap().args().is_empty());

        assert!(SelectionParams::default().to_selection().is_none());
    }

    #[test]
    fn test_payload_rejects_non_json() {
        let err = payload(b"name=Rex").unwrap_err();
        assert_eq!(err.code(), "PETDB_INVALID_BODY");

        let err = payload(b"[1, 2]").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
