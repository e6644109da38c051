//! Order-insensitive approximate string similarity

use super::tokenizer::fold;

/// Similarity of `a` and `b` on a 0.0–1.0 scale, ignoring token order.
///
/// Both sides are folded (lowercase, diacritics removed), split on
/// whitespace, sorted and rejoined before a normalized Levenshtein
/// comparison. `"mi banh"` and `"Bánh Mì"` therefore compare as equal.
/// If either side has no tokens the similarity is 0.0.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(&a, &b)
}

fn sorted_tokens(text: &str) -> String {
    let folded = fold(text);
    let mut tokens: Vec<&str> = folded.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
