//! Route configuration for the interaction endpoint.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, receive_interaction, InteractionAppState};

/// Creates the router with all endpoints.
///
/// Routes:
/// - `POST /interactions` - Relayed Discord interactions (signed)
/// - `GET /health` - Liveness and live session count
pub fn interaction_router(state: InteractionAppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/interactions", post(receive_interaction))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
