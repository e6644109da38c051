//! Chat retrieval and catalog maintenance handlers
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::api_error;
use super::ApiError;
use super::AppState;
use crate::api::types::*;
use crate::rag::Retrieval;
use crate::rag::RetrievalQuery;

/// Route a chat message and return the context and prompt for it
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ApiResponse<Retrieval>>, ApiError> {
    info!("POST /api/chat: {}", req.message);

    let top_k = state.top_k(req.top_k).map_err(|e| api_error(&e))?;
    let query = RetrievalQuery {
        message: req.message,
        cart_items: req.cart_items,
        top_k,
    };
    let retrieval = state
        .service
        .retrieve(&query)
        .await
        .map_err(|e| api_error(&e))?;

    Ok(Json(ApiResponse::success(retrieval)))
}

/// Rebuild the product index from the configured catalog
pub async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReloadResponse>>, ApiError> {
    info!("POST /api/reload");

    let products = state
        .service
        .reload_catalog(state.config.catalog_path())
        .await
        .map_err(|e| api_error(&e))?;

    Ok(Json(ApiResponse::success(ReloadResponse { products })))
}
