//! HTTP route handlers for the JSON API.
//!
//! Every request passes through the same stack: request ID span, HTTP trace
//! layer, CORS response headers, then the origin gate, and only then the
//! handler. A disallowed origin is rejected at the gate, so no handler ever
//! runs for it.

pub mod health;
pub mod messages;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::cors;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and the middleware stack.
pub fn create_router(state: AppState) -> Router {
    let cors_headers = cors::cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(health::health))
        .route("/servermessage", get(messages::server_message))
        .route("/dbmessages", get(messages::list))
        .route("/dbmessage", post(messages::create))
        .with_state(state.clone())
        // Origin gate - rejects disallowed origins before any handler runs
        .layer(middleware::from_fn_with_state(state, cors::cors_gate))
        // CORS headers and preflight answers over the same allow-list
        .layer(cors_headers)
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
