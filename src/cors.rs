//! Origin allow-list enforcement for cross-origin browser requests.
//!
//! Two cooperating pieces:
//! - [`check_origin`] is the pure allow/reject decision over the configured
//!   list, with no HTTP types involved.
//! - [`cors_gate`] applies that decision as middleware and rejects
//!   disallowed origins with 403 before any handler runs (fail closed).
//!
//! Response headers and preflight answers come from `tower_http`'s
//! [`CorsLayer`], built over the same origin list so the two can never
//! disagree. Requests without an `Origin` header are server-to-server calls
//! and pass through untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderValue, Method, StatusCode};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;
use crate::state::AppState;

/// Outcome of matching a request origin against the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    Allow,
    Reject,
}

/// Decide whether a request with the given `Origin` header may proceed.
///
/// An absent origin is allowed: only browsers send the header, and the gate
/// exists to police browser cross-origin traffic. A present origin must match
/// an allow-list entry exactly.
pub fn check_origin(allow_list: &[String], origin: Option<&str>) -> OriginDecision {
    match origin {
        None => OriginDecision::Allow,
        Some(origin) if allow_list.iter().any(|allowed| allowed == origin) => {
            OriginDecision::Allow
        }
        Some(_) => OriginDecision::Reject,
    }
}

/// Middleware that blocks disallowed origins before the handler runs.
pub async fn cors_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());

    match check_origin(&state.config.cors.allowed_origins, origin) {
        OriginDecision::Allow => next.run(request).await,
        OriginDecision::Reject => {
            tracing::warn!(origin = origin.unwrap_or(""), "rejected disallowed origin");
            (StatusCode::FORBIDDEN, "disallowed origin").into_response()
        }
    }
}

/// CORS response-header layer over the configured allow-list.
///
/// Echoes a matching origin in `Access-Control-Allow-Origin` and answers
/// preflight `OPTIONS` requests. Method and header lists are fixed, wide
/// enough for a JSON API rather than derived per route.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
