//! PitchPilot Answer Engine
//!
//! Answers natural-language questions about the PitchPilot platform from a
//! small fixed in-memory corpus:
//! - Unicode-aware tokenization and sparse term vectors
//! - Cosine similarity ranking with confidence fallback
//! - Pain-point vs discovery intent classification
//! - Prompt construction for an external completion service
//! - Deterministic local answer synthesis when that service is unavailable
//!
//! The serving layer builds a [`CorpusIndex`] once at startup, wraps it in an
//! [`AnswerEngine`], and calls [`AnswerEngine::answer`] per request.

pub mod completion;
pub mod corpus;
pub mod intent;
pub mod orchestrator;
pub mod prompt;
pub mod retrieval;
pub mod synthesis;

// Re-export the engine surface
pub use completion::{CompletionOutcome, CompletionProvider, OpenAiCompletion};
pub use corpus::{ChunkingConfig, CorpusIndex, Passage, SourceDocument};
pub use intent::{classify, QueryMode};
pub use orchestrator::{AnswerEngine, AnswerEnvelope, AskRequest, SourceRef};
pub use retrieval::{cosine_similarity, tokenize, vectorize, vectorize_text, Ranker, TermVector};
pub use synthesis::LocalSynthesizer;
