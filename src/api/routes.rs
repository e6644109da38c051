//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{self};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Catalog
        .route("/products", get(handlers::list_products))
        .route("/reload", post(handlers::reload_catalog))
        // Retrieval
        .route("/search", get(handlers::search_products))
        .route("/chat", post(handlers::chat))
        .with_state(state)
}
