//! Answer orchestration
//!
//! Ties the engine together: validate -> rank -> classify -> external
//! completion or local synthesis -> response envelope. External-service
//! failure is never fatal to the response; `ai_powered` reflects whether the
//! external path actually succeeded, not whether it was requested.

use crate::completion::{attempt, CompletionOutcome, CompletionProvider};
use crate::corpus::CorpusIndex;
use crate::intent::{classify, QueryMode};
use crate::prompt::build_prompt;
use crate::retrieval::{vectorize_text, Ranker, RetrievalResult};
use crate::synthesis::LocalSynthesizer;
use pitchpilot_common::config::AppConfig;
use pitchpilot_common::errors::{AppError, Result};
use pitchpilot_common::labels::{industry_label, scenario_label};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;
use validator::Validate;

/// Inbound question request, as deserialized by the serving layer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AskRequest {
    /// The question text; required
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub question: String,

    /// Optional industry code (see `labels::industry_label`)
    pub industry: Option<String>,

    /// Optional scenario code (see `labels::scenario_label`)
    pub scenario: Option<String>,

    /// Passages to retrieve; defaults to the configured top_k
    pub top_k: Option<usize>,

    /// Whether to attempt the external completion service
    pub use_external: Option<bool>,
}

impl AskRequest {
    /// Build a request with just a question, everything else defaulted
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            industry: None,
            scenario: None,
            top_k: None,
            use_external: None,
        }
    }
}

/// One retrieved source as shown in the response envelope
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub source_label: String,
    pub chunk_index: usize,
    pub score: f32,
}

/// The final response envelope serialized by the serving layer
#[derive(Debug, Clone, Serialize)]
pub struct AnswerEnvelope {
    /// The assembled or generated answer
    pub answer_text: String,

    /// True when the retrieved passages did not clear the relevance threshold
    pub low_confidence: bool,

    /// True when the external completion service produced the answer
    pub ai_powered: bool,

    /// Query intent classification
    pub query_mode: QueryMode,

    /// Retrieved passages backing the answer, in rank order
    pub sources: Vec<SourceRef>,
}

/// The retrieval-and-synthesis engine
///
/// Cheap to share: the corpus index is read-only for the process lifetime
/// and every per-request value is owned by that request.
pub struct AnswerEngine {
    index: Arc<CorpusIndex>,
    ranker: Ranker,
    synthesizer: LocalSynthesizer,
    provider: Option<Arc<dyn CompletionProvider>>,
    default_top_k: usize,
}

impl AnswerEngine {
    /// Create an engine over a prebuilt corpus index.
    ///
    /// `provider` is the optional external completion service; `None` means
    /// every answer is synthesized locally.
    pub fn new(
        index: Arc<CorpusIndex>,
        config: &AppConfig,
        provider: Option<Arc<dyn CompletionProvider>>,
    ) -> Self {
        Self {
            index,
            ranker: Ranker::new(config.retrieval.min_score),
            synthesizer: LocalSynthesizer::new(),
            provider,
            default_top_k: config.retrieval.top_k.max(1),
        }
    }

    /// Answer one question end to end
    pub async fn answer(&self, request: AskRequest) -> Result<AnswerEnvelope> {
        let request_id = Uuid::new_v4();
        let span = info_span!("answer", request_id = %request_id);

        async move {
            self.validate(&request)?;

            let question = request.question.trim().to_string();
            let mode = classify(&question);
            let top_k = request.top_k.filter(|&k| k >= 1).unwrap_or(self.default_top_k);

            let query_vector = vectorize_text(&question);
            let retrieval = self.ranker.rank(&query_vector, &self.index, top_k);

            debug!(
                %mode,
                retrieved = retrieval.passages.len(),
                low_confidence = retrieval.low_confidence,
                "Question ranked"
            );

            if retrieval.is_empty() {
                return Ok(self.insufficient_information(&question, mode));
            }

            let industry = request.industry.as_deref().map(industry_label);
            let scenario = request.scenario.as_deref().map(scenario_label);

            let use_external = request.use_external.unwrap_or(true);
            if use_external {
                if let Some(provider) = &self.provider {
                    let prompt = build_prompt(
                        &question,
                        &retrieval.context_text(),
                        industry.as_deref(),
                        scenario.as_deref(),
                        mode,
                    );

                    match attempt(provider.as_ref(), &prompt).await {
                        CompletionOutcome::Completed(text) => {
                            info!(%mode, "Answer generated by completion service");
                            return Ok(self.envelope(text, true, mode, &retrieval));
                        }
                        CompletionOutcome::Unavailable(_) => {
                            // Reason already logged by attempt(); fall through.
                        }
                    }
                }
            }

            let answer = self.synthesizer.synthesize(
                &question,
                industry.as_deref(),
                scenario.as_deref(),
                &retrieval,
            );
            info!(%mode, "Answer synthesized locally");

            Ok(self.envelope(answer, false, mode, &retrieval))
        }
        .instrument(span)
        .await
    }

    fn validate(&self, request: &AskRequest) -> Result<()> {
        if request.question.trim().is_empty() {
            return Err(AppError::MissingField {
                field: "question".to_string(),
            });
        }

        request.validate().map_err(|e| AppError::Validation {
            message: e.to_string(),
            field: Some("question".to_string()),
        })
    }

    fn envelope(
        &self,
        answer_text: String,
        ai_powered: bool,
        mode: QueryMode,
        retrieval: &RetrievalResult,
    ) -> AnswerEnvelope {
        AnswerEnvelope {
            answer_text,
            low_confidence: retrieval.low_confidence,
            ai_powered,
            query_mode: mode,
            sources: retrieval
                .passages
                .iter()
                .map(|s| SourceRef {
                    source_label: s.passage.source_label.clone(),
                    chunk_index: s.passage.chunk_index,
                    score: s.score,
                })
                .collect(),
        }
    }

    fn insufficient_information(&self, question: &str, mode: QueryMode) -> AnswerEnvelope {
        AnswerEnvelope {
            answer_text: format!(
                "There is no information about \"{}\" in the product knowledge base yet. \
                 Try rephrasing the question or ask about orders, inventory, CRM, field \
                 teams, analytics or integrations.",
                question
            ),
            low_confidence: true,
            ai_powered: false,
            query_mode: mode,
            sources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{ChunkingConfig, CorpusIndex, SourceDocument};
    use async_trait::async_trait;

    fn sales_corpus() -> Arc<CorpusIndex> {
        let docs = vec![
            SourceDocument {
                label: "sales-playbook".to_string(),
                text: "Компании часто теряют sales заявки и leads, когда обращения приходят \
                       в мессенджеры и почту. Модуль CRM собирает все обращения в одну \
                       очередь, назначает ответственного и напоминает о просроченных сделках."
                    .to_string(),
            },
            SourceDocument {
                label: "warehouse-guide".to_string(),
                text: "Склад ведет остатки по каждому товару. После каждой отгрузки остатки \
                       списываются автоматически, и менеджер получает актуальные данные."
                    .to_string(),
            },
        ];
        let config = ChunkingConfig {
            chunk_size: 2000,
            min_chunk_size: 10,
        };
        Arc::new(CorpusIndex::build(&docs, &config))
    }

    fn engine(provider: Option<Arc<dyn CompletionProvider>>) -> AnswerEngine {
        AnswerEngine::new(sales_corpus(), &AppConfig::default(), provider)
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(AppError::CompletionError {
                message: "completion service returned status 502".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing-model"
        }
    }

    struct CannedProvider;

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("A generated consultant answer.".to_string())
        }

        fn model_name(&self) -> &str {
            "canned-model"
        }
    }

    #[tokio::test]
    async fn test_pain_point_question_hits_matching_passage() {
        let engine = engine(None);
        let request = AskRequest::question("Мы теряем sales заявки каждую неделю");

        let envelope = engine.answer(request).await.unwrap();

        assert_eq!(envelope.query_mode, QueryMode::PainPoint);
        assert!(!envelope.low_confidence);
        assert!(!envelope.sources.is_empty());
        assert_eq!(envelope.sources[0].source_label, "sales-playbook");
        assert!(envelope.sources[0].score > 0.01);
        assert!(!envelope.ai_powered);
        assert!(!envelope.answer_text.is_empty());
    }

    #[tokio::test]
    async fn test_gibberish_returns_single_low_confidence_source() {
        let engine = engine(None);
        let request = AskRequest::question("asdkj qweqwe");

        let envelope = engine.answer(request).await.unwrap();

        assert!(envelope.low_confidence);
        assert_eq!(envelope.sources.len(), 1);
        assert_eq!(envelope.query_mode, QueryMode::Discovery);
        assert!(!envelope.answer_text.is_empty());
    }

    #[tokio::test]
    async fn test_failed_external_falls_back_to_local_synthesis() {
        let engine = engine(Some(Arc::new(FailingProvider)));
        let request = AskRequest::question("Как склад ведет остатки?");

        let envelope = engine.answer(request).await.unwrap();

        assert!(!envelope.ai_powered);
        assert!(!envelope.answer_text.is_empty());
        assert!(envelope.answer_text.contains("### Summary"));
    }

    #[tokio::test]
    async fn test_successful_external_sets_ai_powered() {
        let engine = engine(Some(Arc::new(CannedProvider)));
        let request = AskRequest::question("Как склад ведет остатки?");

        let envelope = engine.answer(request).await.unwrap();

        assert!(envelope.ai_powered);
        assert_eq!(envelope.answer_text, "A generated consultant answer.");
        assert!(!envelope.sources.is_empty());
    }

    #[tokio::test]
    async fn test_use_external_false_never_calls_provider() {
        struct PanickingProvider;

        #[async_trait]
        impl CompletionProvider for PanickingProvider {
            async fn complete(&self, _prompt: &str) -> Result<String> {
                panic!("provider must not be called");
            }

            fn model_name(&self) -> &str {
                "panicking-model"
            }
        }

        let engine = engine(Some(Arc::new(PanickingProvider)));
        let mut request = AskRequest::question("Как склад ведет остатки?");
        request.use_external = Some(false);

        let envelope = engine.answer(request).await.unwrap();
        assert!(!envelope.ai_powered);
    }

    #[tokio::test]
    async fn test_missing_question_is_input_error() {
        let engine = engine(None);
        let request = AskRequest::question("   ");

        let err = engine.answer(request).await.unwrap_err();

        assert!(err.is_input_error());
        assert!(matches!(err, AppError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_empty_corpus_gives_insufficient_information() {
        let index = Arc::new(CorpusIndex::build(&[], &ChunkingConfig::default()));
        let engine = AnswerEngine::new(index, &AppConfig::default(), None);

        let envelope = engine
            .answer(AskRequest::question("Что умеет система?"))
            .await
            .unwrap();

        assert!(envelope.low_confidence);
        assert!(!envelope.ai_powered);
        assert!(envelope.sources.is_empty());
        assert!(envelope.answer_text.contains("no information"));
    }

    #[tokio::test]
    async fn test_envelope_serializes_query_mode_as_kebab() {
        let engine = engine(None);
        let envelope = engine
            .answer(AskRequest::question("We have a problem with leads"))
            .await
            .unwrap();

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["query_mode"], "pain-point");
        assert!(json["answer_text"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_industry_and_scenario_labels_in_local_answer() {
        let engine = engine(None);
        let mut request = AskRequest::question("Как склад ведет остатки?");
        request.industry = Some("logistics".to_string());
        request.scenario = Some("stock-errors".to_string());

        let envelope = engine.answer(request).await.unwrap();

        assert!(envelope
            .answer_text
            .contains("Industry: Logistics & distribution"));
        assert!(envelope
            .answer_text
            .contains("Scenario: Inventory and stock errors"));
    }
}
