//! The in-memory corpus index
//!
//! Built once at process start from labeled source documents, read-only
//! afterwards. Every passage carries a precomputed term vector, so ranking
//! never touches raw text.

mod chunker;

pub use chunker::{chunk_text, ChunkingConfig};

use crate::retrieval::{vectorize_text, TermVector};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// One raw corpus document before chunking
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Source label shown in answer attributions
    pub label: String,
    /// Full document text
    pub text: String,
}

/// One indexed unit of corpus text with its precomputed term vector
#[derive(Debug, Clone, Serialize)]
pub struct Passage {
    /// Stable identifier, `{label}:{chunk_index}`
    pub id: String,
    /// Label of the source document
    pub source_label: String,
    /// Position of this chunk within its source document
    pub chunk_index: usize,
    /// Chunk text
    pub text: String,
    /// Term vector computed from `text`; never empty for indexed passages
    pub vector: TermVector,
}

/// The fixed set of passages served for the process lifetime
#[derive(Debug, Default)]
pub struct CorpusIndex {
    passages: Vec<Arc<Passage>>,
}

impl CorpusIndex {
    /// Chunk and vectorize source documents into an index.
    ///
    /// Chunks whose term vector comes out empty (punctuation-only fragments)
    /// are skipped so every indexed passage satisfies the non-empty-vector
    /// invariant. Chunk indices are per-document after filtering.
    pub fn build(documents: &[SourceDocument], config: &ChunkingConfig) -> Self {
        let mut passages = Vec::new();

        for doc in documents {
            let mut chunk_index = 0;
            for chunk in chunk_text(&doc.text, config) {
                let vector = vectorize_text(&chunk);
                if vector.is_empty() {
                    continue;
                }

                passages.push(Arc::new(Passage {
                    id: format!("{}:{}", doc.label, chunk_index),
                    source_label: doc.label.clone(),
                    chunk_index,
                    text: chunk,
                    vector,
                }));
                chunk_index += 1;
            }
        }

        info!(
            documents = documents.len(),
            passages = passages.len(),
            "Corpus index built"
        );

        Self { passages }
    }

    /// All indexed passages in corpus order
    pub fn passages(&self) -> &[Arc<Passage>] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<SourceDocument> {
        vec![
            SourceDocument {
                label: "product-overview".to_string(),
                text: "PitchPilot управляет заказами, складом и полевыми командами."
                    .to_string(),
            },
            SourceDocument {
                label: "crm-guide".to_string(),
                text: "Модуль CRM хранит карточки клиентов и историю сделок.".to_string(),
            },
        ]
    }

    #[test]
    fn test_build_creates_vectorized_passages() {
        let config = ChunkingConfig {
            chunk_size: 500,
            min_chunk_size: 10,
        };
        let index = CorpusIndex::build(&docs(), &config);

        assert_eq!(index.len(), 2);
        for passage in index.passages() {
            assert!(!passage.vector.is_empty());
            assert!(!passage.text.is_empty());
        }
    }

    #[test]
    fn test_passage_ids_and_indices() {
        let config = ChunkingConfig {
            chunk_size: 500,
            min_chunk_size: 10,
        };
        let index = CorpusIndex::build(&docs(), &config);

        let first = &index.passages()[0];
        assert_eq!(first.id, "product-overview:0");
        assert_eq!(first.chunk_index, 0);
        assert_eq!(first.source_label, "product-overview");
    }

    #[test]
    fn test_empty_documents_give_empty_index() {
        let index = CorpusIndex::build(&[], &ChunkingConfig::default());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
