//! Okapi BM25 term-frequency ranking over a fixed corpus

use std::collections::HashMap;

/// Term saturation
pub const BM25_K1: f64 = 1.5;
/// Document-length normalization
pub const BM25_B: f64 = 0.75;

/// In-memory BM25 index.
///
/// Built once from tokenized documents; scoring is read-only. Document order
/// is preserved so `scores()[i]` belongs to the `i`-th document passed to
/// [`Bm25::new`].
#[derive(Debug, Clone, Default)]
pub struct Bm25 {
    /// Per-document term frequencies
    term_freqs: Vec<HashMap<String, u32>>,
    doc_lengths: Vec<usize>,
    /// Number of documents containing each term
    doc_freqs: HashMap<String, usize>,
    avg_doc_len: f64,
}

impl Bm25 {
    pub fn new(corpus: &[Vec<String>]) -> Self {
        let mut term_freqs = Vec::with_capacity(corpus.len());
        let mut doc_lengths = Vec::with_capacity(corpus.len());
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();

        for tokens in corpus {
            let mut freqs: HashMap<String, u32> = HashMap::new();
            for token in tokens {
                *freqs.entry(token.clone()).or_insert(0) += 1;
            }
            for term in freqs.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lengths.push(tokens.len());
            term_freqs.push(freqs);
        }

        let total_len: usize = doc_lengths.iter().sum();
        let avg_doc_len = if doc_lengths.is_empty() {
            0.0
        } else {
            total_len as f64 / doc_lengths.len() as f64
        };

        Self {
            term_freqs,
            doc_lengths,
            doc_freqs,
            avg_doc_len,
        }
    }

    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    /// Distinct terms across the corpus
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freqs.len()
    }

    pub fn avg_doc_len(&self) -> f64 {
        self.avg_doc_len
    }

    /// Inverse document frequency, `ln(1 + (N - df + 0.5) / (df + 0.5))`.
    ///
    /// Never negative, so a term present in every document still counts.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freqs.get(term).copied().unwrap_or(0) as f64;
        let n = self.len() as f64;
        ((n - df + 0.5) / (df + 0.5)).ln_1p()
    }

    /// One score per document, in corpus order.
    ///
    /// Each query token contributes separately, so a repeated query token
    /// counts twice. Tokens absent from a document contribute zero.
    pub fn scores(&self, query: &[String]) -> Vec<f64> {
        let mut scores = vec![0.0; self.len()];
        if self.avg_doc_len <= 0.0 {
            return scores;
        }

        for term in query {
            if !self.doc_freqs.contains_key(term) {
                continue;
            }
            let idf = self.idf(term);
            for (doc, freqs) in self.term_freqs.iter().enumerate() {
                let Some(&tf) = freqs.get(term) else {
                    continue;
                };
                let tf = f64::from(tf);
                let length_norm =
                    BM25_B.mul_add(self.doc_lengths[doc] as f64 / self.avg_doc_len, 1.0 - BM25_B);
                scores[doc] += idf * (tf * (BM25_K1 + 1.0)) / BM25_K1.mul_add(length_norm, tf);
            }
        }

        scores
    }
}
