//! Text normalization shared by the lexical and fuzzy scorers

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and split on whitespace.
///
/// Queries and documents must go through the same function so that their
/// tokens line up in the term-frequency index.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Lowercase and strip diacritics for approximate comparison.
///
/// Vietnamese tone and vowel marks decompose under NFD and are dropped;
/// `đ` has no decomposition and is mapped to `d` explicitly.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Giỏ  Quà\tTết\n2025"),
            vec!["giỏ", "quà", "tết", "2025"]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n ").is_empty());
    }

    #[test]
    fn test_fold_strips_vietnamese_marks() {
        assert_eq!(fold("Bánh Mì"), "banh mi");
        assert_eq!(fold("Đồ Uống Đặc Biệt"), "do uong dac biet");
        assert_eq!(fold("Nước mắm Phú Quốc"), "nuoc mam phu quoc");
    }

    #[test]
    fn test_fold_leaves_ascii_untouched() {
        assert_eq!(fold("coffee 500g"), "coffee 500g");
    }
}
