//! API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::config::AppConfig;
use crate::rag::RetrievalService;
use crate::search::validate_top_k;
use crate::ShopRagError;

// Re-export sub-modules
pub mod chat;
pub mod search;

// Re-export handlers
pub use chat::*;
pub use search::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: RetrievalService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service: RetrievalService, config: AppConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Validate a caller-supplied result count, defaulting from config
    fn top_k(&self, requested: Option<i64>) -> Result<usize, ShopRagError> {
        match requested {
            Some(top_k) => validate_top_k(top_k),
            None => Ok(self.config.default_top_k()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a library error to an HTTP status and error body
pub fn api_error(e: &ShopRagError) -> ApiError {
    let status = if e.is_client_error() {
        warn!("Rejected request: {}", e);
        StatusCode::BAD_REQUEST
    } else {
        error!("Request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let products = state.service.products().snapshot().await.len();
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        products,
        policy_chunks: state.service.policy().len(),
    }))
}
