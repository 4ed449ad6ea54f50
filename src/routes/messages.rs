//! Handlers for the message store and the static server message.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::config::MESSAGE_LIST_LIMIT;
use crate::db::Message;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServerMessage {
    message: &'static str,
    timestamp: String,
}

/// Static message payload, no database access.
pub async fn server_message() -> Json<ServerMessage> {
    Json(ServerMessage {
        message: "Hello from the message board API",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// List the most recent messages, newest first.
#[instrument(name = "messages::list", skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.store.recent_messages(MESSAGE_LIST_LIMIT).await?;
    Ok(Json(messages))
}

/// Create a message from the `content` field of the JSON body.
///
/// `content` must be a JSON string and non-empty after trimming; anything
/// else is rejected before the store is touched. The stored content is the
/// trimmed form.
#[instrument(name = "messages::create", skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .ok_or(AppError::Validation("content is required"))?;

    let message = state.store.create_message(content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
