//! Hybrid lexical + fuzzy product index

use tracing::debug;
use tracing::info;

use super::bm25::Bm25;
use super::fuzzy::token_sort_ratio;
use super::tokenizer::tokenize;
use super::FUZZY_WEIGHT;
use super::LEXICAL_WEIGHT;
use super::SCORE_THRESHOLD;
use crate::models::ProductRecord;
use crate::models::ScoreBreakdown;
use crate::models::ScoredResult;
use crate::Result;
use crate::ShopRagError;

/// Searchable view over a product catalog.
///
/// Immutable once built; share it behind an `Arc` for concurrent queries
/// and rebuild it (see [`super::SharedIndex`]) to pick up catalog changes.
#[derive(Debug, Clone, Default)]
pub struct HybridProductIndex {
    products: Vec<ProductRecord>,
    bm25: Bm25,
}

impl HybridProductIndex {
    /// Index `title + " " + content` of every product, in catalog order.
    ///
    /// An empty catalog is valid and yields an index that never returns
    /// results.
    pub fn build(products: Vec<ProductRecord>) -> Self {
        let corpus: Vec<Vec<String>> = products
            .iter()
            .map(|product| tokenize(&product.searchable_text()))
            .collect();
        let bm25 = Bm25::new(&corpus);

        info!(
            "Built product index: {} documents, {} distinct terms, avg length {:.1}",
            bm25.len(),
            bm25.vocabulary_size(),
            bm25.avg_doc_len()
        );

        Self { products, bm25 }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Indexed products in catalog order
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Score components of every product for `query`, in catalog order.
    ///
    /// No threshold or truncation is applied.
    pub fn explain(&self, query: &str) -> Vec<ScoreBreakdown> {
        let lexical = self.bm25.scores(&tokenize(query));
        let query = query.to_lowercase();

        self.products
            .iter()
            .zip(lexical)
            .enumerate()
            .map(|(index, (product, lexical))| {
                let fuzzy = token_sort_ratio(&query, &product.title.to_lowercase());
                ScoreBreakdown {
                    index,
                    lexical,
                    fuzzy,
                    score: blend(lexical, fuzzy),
                }
            })
            .collect()
    }

    /// Ranked products whose blended score exceeds [`SCORE_THRESHOLD`].
    ///
    /// At most `top_k` results, highest score first; equal scores keep
    /// catalog order. `top_k` of zero is rejected.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredResult>> {
        if top_k == 0 {
            return Err(ShopRagError::InvalidArgument(
                "top_k must be at least 1, got 0".to_string(),
            ));
        }

        let mut candidates: Vec<ScoreBreakdown> = self
            .explain(query)
            .into_iter()
            .filter(|breakdown| breakdown.score > SCORE_THRESHOLD)
            .collect();
        let matched = candidates.len();

        // Stable sort: ties stay in catalog order
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(top_k);

        debug!(
            "Product search {:?}: {} above threshold, returning {}",
            query,
            matched,
            candidates.len()
        );

        Ok(candidates
            .into_iter()
            .map(|breakdown| {
                let mut record = self.products[breakdown.index].clone();
                record.extra.remove("score");
                ScoredResult {
                    record,
                    score: breakdown.score,
                }
            })
            .collect())
    }
}

/// `LEXICAL_WEIGHT * lexical + FUZZY_WEIGHT * fuzzy`.
///
/// Lexical scores are unbounded while fuzzy scores are 0–1, so the
/// threshold's selectivity shifts with corpus statistics.
pub fn blend(lexical: f64, fuzzy: f64) -> f64 {
    LEXICAL_WEIGHT.mul_add(lexical, FUZZY_WEIGHT * fuzzy)
}

/// Convert a caller-supplied signed result count into a valid `top_k`
pub fn validate_top_k(top_k: i64) -> Result<usize> {
    usize::try_from(top_k)
        .ok()
        .filter(|k| *k >= 1)
        .ok_or_else(|| {
            ShopRagError::InvalidArgument(format!("top_k must be at least 1, got {top_k}"))
        })
}
