//! Cosine similarity ranking with confidence fallback

use super::{RetrievalResult, ScoredPassage, TermVector};
use crate::corpus::CorpusIndex;
use std::sync::Arc;
use tracing::debug;

/// Cosine similarity between two sparse term vectors.
///
/// Defined as 0.0 (not NaN) when either vector has zero magnitude.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller map for the dot product
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f64 = small
        .iter()
        .filter_map(|(token, &count)| {
            large
                .get(token)
                .map(|&other| f64::from(count) * f64::from(other))
        })
        .sum();

    let norm_a: f64 = a.values().map(|&c| f64::from(c) * f64::from(c)).sum();
    let norm_b: f64 = b.values().map(|&c| f64::from(c) * f64::from(c)).sum();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Ranks a query vector against the corpus index
#[derive(Debug, Clone)]
pub struct Ranker {
    /// Passages scoring at or below this are considered irrelevant
    min_score: f32,
}

impl Ranker {
    /// Create a ranker with the given relevance threshold
    pub fn new(min_score: f32) -> Self {
        Self { min_score }
    }

    /// Score every passage, rank descending, keep top_k, then apply the
    /// relevance filter.
    ///
    /// Fallback policy: if the filter removes everything but the corpus is
    /// non-empty, the single best passage is kept and the result is flagged
    /// low-confidence. An empty corpus yields an empty result; the caller
    /// turns that into an "insufficient information" answer.
    pub fn rank(&self, query: &TermVector, index: &CorpusIndex, top_k: usize) -> RetrievalResult {
        let mut ranked: Vec<ScoredPassage> = index
            .passages()
            .iter()
            .map(|passage| ScoredPassage {
                passage: Arc::clone(passage),
                score: cosine_similarity(query, &passage.vector),
            })
            .collect();

        // Stable sort: ties keep corpus insertion order
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_k.max(1));

        let relevant: Vec<ScoredPassage> = ranked
            .iter()
            .filter(|s| s.score > self.min_score)
            .cloned()
            .collect();

        debug!(
            candidates = index.len(),
            kept = relevant.len(),
            top_score = ranked.first().map(|s| s.score).unwrap_or(0.0),
            "Ranked query against corpus"
        );

        if !relevant.is_empty() {
            return RetrievalResult {
                passages: relevant,
                low_confidence: false,
            };
        }

        if let Some(best) = ranked.into_iter().next() {
            return RetrievalResult {
                passages: vec![best],
                low_confidence: true,
            };
        }

        RetrievalResult::default()
    }
}
