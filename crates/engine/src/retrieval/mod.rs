//! Passage retrieval over the in-memory corpus
//!
//! Provides:
//! - Unicode-aware tokenization and sparse term vectors
//! - Cosine similarity ranking with a relevance threshold
//! - Low-confidence fallback when nothing clears the threshold

mod ranker;
mod vectorizer;

pub use ranker::{cosine_similarity, Ranker};
pub use vectorizer::{tokenize, vectorize, vectorize_text, TermVector};

use crate::corpus::Passage;
use std::sync::Arc;

/// A passage paired with its relevance score for one query
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    /// The indexed passage
    pub passage: Arc<Passage>,

    /// Cosine similarity against the query (0.0 - 1.0)
    pub score: f32,
}

/// Ordered top-k retrieval outcome for one query
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    /// Passages ranked by descending score
    pub passages: Vec<ScoredPassage>,

    /// True when no passage cleared the relevance threshold and the single
    /// best guess was kept instead
    pub low_confidence: bool,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Concatenated text of all retrieved passages, in rank order
    pub fn context_text(&self) -> String {
        self.passages
            .iter()
            .map(|s| s.passage.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
