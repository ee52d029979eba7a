//! Text normalization and sparse term vectors
//!
//! The corpus is predominantly Cyrillic, so tokenization has to be
//! Unicode-aware: any alphanumeric character in any script counts as a word
//! character, everything else is a separator.

use std::collections::HashMap;

/// Sparse token -> count representation of a text
pub type TermVector = HashMap<String, u32>;

/// Normalize raw text into lowercase word tokens.
///
/// Every character that is not alphanumeric or `_` becomes a space, then the
/// text is split on whitespace runs. Empty input yields an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Count token occurrences into a term vector
pub fn vectorize(tokens: &[String]) -> TermVector {
    let mut vector = TermVector::with_capacity(tokens.len());
    for token in tokens {
        *vector.entry(token.clone()).or_insert(0) += 1;
    }
    vector
}

/// Tokenize and vectorize in one step
pub fn vectorize_text(text: &str) -> TermVector {
    vectorize(&tokenize(text))
}
