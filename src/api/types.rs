//! API request and response types

use serde::Deserialize;
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub products: usize,
    pub policy_chunks: usize,
}

/// Product search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    /// Signed so that non-positive values can be rejected with a message
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Chat retrieval request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub cart_items: Vec<String>,
    #[serde(default)]
    pub top_k: Option<i64>,
}

/// Catalog reload response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub products: usize,
}
