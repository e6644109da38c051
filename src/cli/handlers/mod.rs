//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - search: Catalog search and listing
//! - rag: Query routing and prompt context
//! - serve: API server
//! - info: Configuration display

pub mod info;
pub mod rag;
pub mod search;
pub mod serve;

// Re-export all public handlers
pub use info::*;
pub use rag::*;
pub use search::*;
pub use serve::*;

use crate::config::AppConfig;
use crate::search::validate_top_k;
use crate::Result;

/// Resolve a `-k` flag against the configured default
pub(crate) fn resolve_top_k(config: &AppConfig, top_k: Option<i64>) -> Result<usize> {
    top_k.map_or_else(|| Ok(config.default_top_k()), validate_top_k)
}
