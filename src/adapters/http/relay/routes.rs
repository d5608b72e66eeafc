//! Axum routes for the relay endpoint.
//!
//! Single endpoint, POST only. Non-POST methods fall through to a 405 with
//! a plain-text body.

use axum::routing::post;
use axum::Router;

use super::handlers::{handle_action, method_not_allowed, RelayAppState};

/// Creates the relay routes.
///
/// Endpoints:
/// - POST /relay - dispatch one of the five actions
/// - POST /      - same handler, for single-URL deployments
pub fn relay_routes() -> Router<RelayAppState> {
    Router::new()
        .route("/relay", post(handle_action).fallback(method_not_allowed))
        .route("/", post(handle_action).fallback(method_not_allowed))
}

/// Complete router with state attached.
pub fn relay_router(state: RelayAppState) -> Router {
    relay_routes().with_state(state)
}
