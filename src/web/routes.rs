//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pipeline routes
        .route("/suggest", get(handlers::suggest))
        .route("/search", get(handlers::search))
        .route("/history", get(handlers::history))
        // Screen fetchers
        .route("/feed", get(handlers::feed))
        // Introspection
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_snapshot))
        // Add middleware
        .layer(cors)
        // Add state
        .with_state(state)
}
