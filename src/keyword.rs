//! Keyword statistics over extracted page text.
//!
//! Tokenization is plain whitespace splitting; matches are exact lower-cased
//! token comparisons, so "rust" does not match "rustlang".

/// Percentage of tokens in `text` exactly matching `keyword`,
/// case-insensitively. An empty text yields 0, never NaN.
pub fn density(text: &str, keyword: &str) -> f64 {
    let keyword = keyword.to_lowercase();
    let mut total: usize = 0;
    let mut matches: usize = 0;

    for token in text.split_whitespace() {
        total += 1;
        if token.to_lowercase() == keyword {
            matches += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }

    (matches as f64 / total as f64) * 100.0
}

/// Case-insensitive substring containment against the raw (untokenized) text.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_counts_exact_tokens() {
        let text = "rust is fast and rust is safe";
        // 2 of 7 tokens
        let density = density(text, "rust");
        assert!((density - 2.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_is_case_insensitive() {
        assert!((density("Rust RUST rust", "rUsT") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_ignores_substrings() {
        assert_eq!(density("rustlang rustc", "rust"), 0.0);
    }

    #[test]
    fn test_density_empty_text_is_zero() {
        assert_eq!(density("", "rust"), 0.0);
        assert_eq!(density("   \n\t  ", "rust"), 0.0);
    }

    #[test]
    fn test_contains_keyword() {
        assert!(contains_keyword("Learn Rust in 30 days", "rust"));
        assert!(contains_keyword("rustlang", "rust"));
        assert!(!contains_keyword("Learn Go in 30 days", "rust"));
    }
}
