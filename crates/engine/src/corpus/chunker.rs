//! Text chunking for corpus documents
//!
//! Splits source documents into passage-sized chunks for vectorization.

use text_splitter::{ChunkConfig, TextSplitter};
use tracing::debug;

/// Configuration for text chunking
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Minimum chunk size in characters (smaller fragments are dropped)
    pub min_chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            min_chunk_size: 80,
        }
    }
}

/// Split text into passage-sized chunks.
///
/// Fragments below the minimum size are dropped; the caller assigns chunk
/// indices after filtering.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let splitter = TextSplitter::new(ChunkConfig::new(config.chunk_size));

    let chunks: Vec<String> = splitter
        .chunks(text)
        .filter(|chunk| chunk.chars().count() >= config.min_chunk_size)
        .map(|chunk| chunk.to_string())
        .collect();

    debug!(
        input_len = text.len(),
        chunk_count = chunks.len(),
        chunk_size = config.chunk_size,
        "Text chunked"
    );

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let config = ChunkingConfig {
            chunk_size: 500,
            min_chunk_size: 5,
        };
        let chunks = chunk_text("A short passage about order capture.", &config);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("order capture"));
    }

    #[test]
    fn test_long_text_splits() {
        let config = ChunkingConfig {
            chunk_size: 120,
            min_chunk_size: 10,
        };
        let text = "Заявка поступает в систему. Менеджер получает уведомление и назначает \
                    исполнителя. После подтверждения заказ передается на склад. Склад собирает \
                    позиции и списывает остатки. Затем курьер получает маршрут и доставляет заказ.";
        let chunks = chunk_text(text, &config);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn test_small_fragments_dropped() {
        let config = ChunkingConfig {
            chunk_size: 500,
            min_chunk_size: 100,
        };
        let chunks = chunk_text("Too short.", &config);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let chunks = chunk_text("", &ChunkingConfig::default());
        assert!(chunks.is_empty());
    }
}
