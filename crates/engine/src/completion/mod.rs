//! External completion service client
//!
//! Provides:
//! - The `CompletionProvider` seam the orchestrator talks to
//! - An OpenAI-compatible chat-completions client
//! - The `CompletionOutcome` fold that keeps failures off the request path
//!
//! The call is bounded by the client timeout and made exactly once; a retry
//! loop would inflate latency on a synchronous user-facing path when local
//! synthesis is always available as the fallback.

use async_trait::async_trait;
use pitchpilot_common::config::CompletionConfig;
use pitchpilot_common::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Outcome of one completion attempt
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    /// The service returned generated text
    Completed(String),
    /// The service was unavailable; the reason is logged, not surfaced
    Unavailable(String),
}

/// Trait for prompt-in/text-out completion services
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate text for a single prompt
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Attempt a completion, folding every failure into `Unavailable`.
///
/// The orchestrator handles both variants; no completion error crosses the
/// request boundary as `Err`.
pub async fn attempt(provider: &dyn CompletionProvider, prompt: &str) -> CompletionOutcome {
    match provider.complete(prompt).await {
        Ok(text) if !text.trim().is_empty() => CompletionOutcome::Completed(text),
        Ok(_) => {
            warn!(model = provider.model_name(), "Completion returned empty text");
            CompletionOutcome::Unavailable("empty completion".to_string())
        }
        Err(err) => {
            warn!(
                model = provider.model_name(),
                error = %err,
                "Completion unavailable, falling back to local synthesis"
            );
            CompletionOutcome::Unavailable(err.to_string())
        }
    }
}

/// OpenAI-compatible chat-completions client
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

impl OpenAiCompletion {
    /// Create a client from completion configuration
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout,
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config
                .api_base
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::MissingCredential);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::CompletionTimeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    AppError::HttpClient(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::CompletionError {
                message: format!("completion service returned status {}", status),
            });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|e| AppError::CompletionError {
                message: format!("malformed completion payload: {}", e),
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::CompletionError {
                message: "completion payload had no choices".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(AppError::CompletionError {
                message: "completion service returned status 500".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "failing-model"
        }
    }

    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn complete(&self, prompt: &str) -> Result<String> {
            Ok(format!("echo: {}", prompt))
        }

        fn model_name(&self) -> &str {
            "echo-model"
        }
    }

    #[tokio::test]
    async fn test_attempt_folds_errors_into_unavailable() {
        let outcome = attempt(&FailingProvider, "hello").await;
        match outcome {
            CompletionOutcome::Unavailable(reason) => {
                assert!(reason.contains("500"));
            }
            CompletionOutcome::Completed(_) => panic!("expected Unavailable"),
        }
    }

    #[tokio::test]
    async fn test_attempt_passes_through_text() {
        let outcome = attempt(&EchoProvider, "hello").await;
        match outcome {
            CompletionOutcome::Completed(text) => assert_eq!(text, "echo: hello"),
            CompletionOutcome::Unavailable(_) => panic!("expected Completed"),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let config = CompletionConfig::default();
        let client = OpenAiCompletion::new(&config).unwrap();

        let err = client.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));
        assert!(err.is_completion_failure());
    }
}
