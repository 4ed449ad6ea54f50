//! Application error type and its single HTTP mapping boundary.
//!
//! Handlers return `Result<_, AppError>`; the `IntoResponse` impl is the one
//! place error kinds are translated to status codes, so no handler carries
//! its own status-mapping logic. Callers distinguish failure kinds by status
//! code alone; there are no structured error codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body failed validation; nothing was written to the store.
    #[error("{0}")]
    Validation(&'static str),

    /// The store was unreachable or the query failed. The driver message is
    /// passed through to the response body; acceptable for this
    /// internal-facing API.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => {
                tracing::error!(error = %self, "store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
