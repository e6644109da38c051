//! Lexical retrieval over the store policy document
//!
//! The document is split into overlapping chunks, preferring paragraph,
//! then line, then sentence, then word boundaries, and the chunks are
//! ranked with BM25.

use std::collections::VecDeque;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::PolicyConfig;
use crate::search::tokenize;
use crate::search::Bm25;

/// Split points, coarsest first. The empty separator splits into chars.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// A retrieved policy passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyChunk {
    /// Position of the chunk in the document
    pub position: usize,
    pub text: String,
    pub score: f64,
}

/// Splits text into chunks of at most `chunk_size` characters, carrying up
/// to `chunk_overlap` characters of context from one chunk into the next.
#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, SEPARATORS)
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let finer = separators.get(position + 1..).unwrap_or(&[]);

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            // Pieces keep their trailing separator
            text.split_inclusive(separator)
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();
        for piece in pieces {
            if char_len(&piece) <= self.chunk_size {
                fitting.push(piece);
                continue;
            }
            if !fitting.is_empty() {
                chunks.extend(self.merge(&fitting));
                fitting.clear();
            }
            if finer.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, finer));
            }
        }
        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting));
        }
        chunks
    }

    /// Greedily concatenate pieces up to `chunk_size`, keeping a tail of at
    /// most `chunk_overlap` characters as the start of the next chunk.
    fn merge(&self, pieces: &[String]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !current.is_empty() {
                chunks.push(current.iter().copied().collect::<String>());
                while let Some(first) = current.front().copied() {
                    if total <= self.chunk_overlap && total + len <= self.chunk_size {
                        break;
                    }
                    total -= char_len(first);
                    current.pop_front();
                }
            }

            current.push_back(piece.as_str());
            total += len;
        }

        if !current.is_empty() {
            chunks.push(current.iter().copied().collect::<String>());
        }
        chunks
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// BM25 index over policy chunks
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    chunks: Vec<String>,
    bm25: Bm25,
    top_k: usize,
}

impl PolicyIndex {
    /// Chunk `text` and index every chunk with more than `min_words` words
    pub fn build(text: &str, config: &PolicyConfig) -> Self {
        let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap);
        let chunks: Vec<String> = splitter
            .split(text)
            .into_iter()
            .filter(|chunk| chunk.split_whitespace().count() > config.min_words)
            .collect();
        let corpus: Vec<Vec<String>> = chunks.iter().map(|chunk| tokenize(chunk)).collect();

        info!("Built policy index: {} chunks", chunks.len());

        Self {
            bm25: Bm25::new(&corpus),
            chunks,
            top_k: config.top_k.max(1),
        }
    }

    /// Load the policy document, or an empty index if it cannot be read
    pub fn load<P: AsRef<Path>>(path: P, config: &PolicyConfig) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::build(&text, config),
            Err(e) => {
                warn!("Policy document {} unavailable: {}", path.display(), e);
                Self {
                    top_k: config.top_k.max(1),
                    ..Self::default()
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// Best matching chunks with a positive score, highest first
    pub fn retrieve(&self, query: &str) -> Vec<PolicyChunk> {
        let scores = self.bm25.scores(&tokenize(query));
        let mut matches: Vec<PolicyChunk> = scores
            .into_iter()
            .enumerate()
            .filter(|(_, score)| *score > 0.0)
            .map(|(position, score)| PolicyChunk {
                position,
                text: self.chunks[position].clone(),
                score,
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(self.top_k);
        debug!("Policy search {:?}: {} chunks", query, matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PolicyConfig {
        PolicyConfig {
            chunk_size: 60,
            chunk_overlap: 10,
            min_words: 2,
            top_k: 2,
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let splitter = TextSplitter::new(500, 50);
        assert_eq!(splitter.split("  Giao hàng miễn phí.  "), vec!["Giao hàng miễn phí."]);
    }

    #[test]
    fn test_paragraphs_are_kept_together_when_they_fit() {
        let splitter = TextSplitter::new(50, 0);
        let chunks = splitter.split("Đổi trả trong 7 ngày.\n\nGiao hàng toàn quốc.");
        assert_eq!(chunks, vec!["Đổi trả trong 7 ngày.\n\nGiao hàng toàn quốc."]);

        let splitter = TextSplitter::new(25, 0);
        let chunks = splitter.split("Đổi trả trong 7 ngày.\n\nGiao hàng toàn quốc.");
        assert_eq!(chunks, vec!["Đổi trả trong 7 ngày.", "Giao hàng toàn quốc."]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let text = "một hai ba bốn năm sáu bảy tám chín mười ".repeat(20);
        let splitter = TextSplitter::new(50, 10);
        let chunks = splitter.split(&text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 50));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda";
        let splitter = TextSplitter::new(20, 8);
        let chunks = splitter.split(text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let first_word = pair[1].split_whitespace().next().unwrap();
            assert!(
                pair[0].split_whitespace().any(|word| word == first_word),
                "{:?} does not carry over from {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_sentence_split_keeps_full_stops() {
        let text = "Đổi trả trong bảy ngày làm việc. Giao hàng miễn phí toàn quốc. Hỗ trợ 24/7.";

        let splitter = TextSplitter::new(40, 0);
        assert_eq!(
            splitter.split(text),
            vec![
                "Đổi trả trong bảy ngày làm việc.",
                "Giao hàng miễn phí toàn quốc.",
                "Hỗ trợ 24/7.",
            ]
        );

        // A sentence longer than the chunk size still ends with its period
        let splitter = TextSplitter::new(30, 0);
        assert_eq!(
            splitter.split(text),
            vec![
                "Đổi trả trong bảy ngày làm",
                "việc.",
                "Giao hàng miễn phí toàn quốc.",
                "Hỗ trợ 24/7.",
            ]
        );
    }

    #[test]
    fn test_unbroken_text_falls_back_to_characters() {
        let splitter = TextSplitter::new(4, 0);
        assert_eq!(splitter.split("abcdefghij"), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_policy_retrieval_ranks_relevant_chunk_first() {
        let text = "Chính sách đổi trả: khách hàng được đổi trả sản phẩm trong vòng 7 ngày.\n\n\
                    Chính sách giao hàng: miễn phí giao hàng cho đơn từ 500k.\n\n\
                    Ok.";
        let index = PolicyIndex::build(text, &config());

        // "Ok." has too few words to be indexed
        assert!(index.chunks().iter().all(|chunk| chunk != "Ok."));

        let results = index.retrieve("giao hàng miễn phí");
        assert!(!results.is_empty());
        assert!(results[0].text.contains("miễn phí"));
        assert!(results.len() <= 2);
    }

    #[test]
    fn test_missing_policy_file_is_empty() {
        let index = PolicyIndex::load("/nonexistent/shoprag/policy.txt", &config());
        assert!(index.is_empty());
        assert!(index.retrieve("đổi trả").is_empty());
    }
}
