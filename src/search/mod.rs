//! Product retrieval
//!
//! Products are ranked by blending two signals:
//! - BM25 over `title + content` tokens (lexical relevance)
//! - token-sort similarity between the query and the title (typos, word
//!   order, missing Vietnamese diacritics)
//!
//! # Examples
//!
//! ```rust
//! use shoprag::models::ProductRecord;
//! use shoprag::search::HybridProductIndex;
//!
//! let index = HybridProductIndex::build(vec![
//!     ProductRecord::new("Giỏ Quà Tết Cao Cấp 2025", "quà tết cao cấp"),
//! ]);
//! let results = index.search("giỏ quà tết", 10).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod bm25;
pub mod fuzzy;
pub mod index;
pub mod shared;
pub mod tokenizer;

pub use bm25::Bm25;
pub use fuzzy::token_sort_ratio;
pub use index::blend;
pub use index::validate_top_k;
pub use index::HybridProductIndex;
pub use shared::SharedIndex;
pub use tokenizer::fold;
pub use tokenizer::tokenize;

/// Share of the BM25 score in the blended score
pub const LEXICAL_WEIGHT: f64 = 0.7;
/// Share of the title similarity in the blended score
pub const FUZZY_WEIGHT: f64 = 0.3;
/// Results must score strictly above this
pub const SCORE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_TOP_K: usize = 10;
