use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::cors_layer;
use super::state::AppState;
use super::v1;
use crate::config::ServerConfig;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready endpoint is not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Catalog API
        .nest("/api/v1", v1::create_v1_router())
        // Add state and middleware
        .with_state(state)
        .layer(cors_layer(&server.cors_origin_list()))
        .layer(TraceLayer::new_for_http())
}
