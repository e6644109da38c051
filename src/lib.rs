//! Retrieval backend for a storefront chat assistant.
//!
//! Products from a JSON catalog are ranked with a blend of BM25 and a
//! diacritic-insensitive fuzzy title match. Chat messages are routed to
//! either the product index or the store policy document, and the
//! retrieved records are rendered into a prompt for a language model.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod rag;
pub mod search;


pub use config::AppConfig;
pub use errors::*;
pub use models::ProductRecord;
pub use models::ScoredResult;
pub use search::HybridProductIndex;
