//! Product-related API handlers
use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::api_error;
use super::ApiError;
use super::AppState;
use crate::api::types::*;
use crate::catalog::try_load_catalog;
use crate::models::ProductRecord;
use crate::models::ScoredResult;

/// List the catalog as stored on disk
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductRecord>>>, ApiError> {
    info!("GET /api/products");

    let path = state.config.catalog_path().to_path_buf();
    let products = tokio::task::spawn_blocking(move || try_load_catalog(path))
        .await
        .map_err(|e| api_error(&crate::ShopRagError::Custom(e.to_string())))?
        .map_err(|e| api_error(&e))?;

    Ok(Json(ApiResponse::success(products)))
}

/// Hybrid product search
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ScoredResult>>>, ApiError> {
    info!("GET /api/search: {}", query.q);

    let top_k = state.top_k(query.limit).map_err(|e| api_error(&e))?;
    let index = state.service.products().snapshot().await;
    let results = index.search(&query.q, top_k).map_err(|e| api_error(&e))?;

    Ok(Json(ApiResponse::success(results)))
}
