//! Health check endpoint for container orchestration.
//!
//! Reports process liveness and database reachability as separate fields: a
//! down database yields HTTP 500 for probes while `status` stays "ok",
//! because the process itself is still serving requests.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check handler.
///
/// Runs a trivial round-trip query against the store. Reachable → 200 with
/// `db: "ok"`; unreachable → 500 with `db: "down"` and the driver error.
#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                db: "ok",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "database unreachable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "ok",
                    db: "down",
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
