//! Answer queries against the model under evaluation.

use std::sync::Arc;

use hallucheck_core::{prompts, ExperimentMode, QaItem};

use crate::providers::{ChatMessage, CompletionConfig, LlmProvider};

/// Asks the answering model one question in a given mode.
///
/// Failures never surface as errors: the returned text describes the
/// failure instead, and the judge then sees that text as the answer.
pub struct AnswerClient {
    provider: Arc<dyn LlmProvider>,
    config: CompletionConfig,
}

impl AnswerClient {
    /// Create a client for `provider` with per-request settings `config`.
    pub fn new(provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        Self { provider, config }
    }

    /// Build the system + user messages for `item` under `mode`.
    pub fn build_messages(item: &QaItem, mode: ExperimentMode) -> Vec<ChatMessage> {
        let profile = mode.profile();
        let user = if profile.embeds_context {
            prompts::with_context(&item.answer, &item.question)
        } else {
            item.question.clone()
        };

        vec![ChatMessage::system(profile.system_prompt), ChatMessage::user(user)]
    }

    /// Query the model; returns its answer or an inline error description.
    pub async fn answer(&self, item: &QaItem, mode: ExperimentMode) -> String {
        let messages = Self::build_messages(item, mode);

        match self.provider.complete(messages, &self.config).await {
            Ok(response) => response.content,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Answer query failed, passing error text to the judge"
                );
                format!(
                    "An unexpected error occurred in {} query: {e}",
                    self.provider.name()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{CompletionResponse, ProviderError, TokenUsage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last request and replies with a fixed outcome.
    struct RecordingProvider {
        reply: Result<&'static str, u16>,
        seen: Mutex<Option<(Vec<ChatMessage>, CompletionConfig)>>,
    }

    impl RecordingProvider {
        fn replying(text: &'static str) -> Self {
            Self {
                reply: Ok(text),
                seen: Mutex::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for RecordingProvider {
        async fn complete(
            &self,
            messages: Vec<ChatMessage>,
            config: &CompletionConfig,
        ) -> Result<CompletionResponse, ProviderError> {
            *self.seen.lock().unwrap() = Some((messages, config.clone()));
            match self.reply {
                Ok(text) => Ok(CompletionResponse {
                    content: text.to_string(),
                    usage: TokenUsage::default(),
                    model: config.model.clone(),
                }),
                Err(status) => Err(ProviderError::ApiError {
                    status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }

        fn name(&self) -> &str {
            "perplexity"
        }
    }

    fn item() -> QaItem {
        QaItem::new("What is the capital of Vietnam?", "Hanoi is the capital of Vietnam.")
    }

    #[test]
    fn test_baseline_messages() {
        let messages = AnswerClient::build_messages(&item(), ExperimentMode::Baseline);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system(prompts::BASELINE_SYSTEM_PROMPT));
        assert_eq!(messages[1], ChatMessage::user("What is the capital of Vietnam?"));
    }

    #[test]
    fn test_prompt_tuned_messages() {
        let messages = AnswerClient::build_messages(&item(), ExperimentMode::PromptTuned);
        assert_eq!(messages[0].content, prompts::PROMPT_TUNED_SYSTEM_PROMPT);
        assert_eq!(messages[1].content, "What is the capital of Vietnam?");
    }

    #[test]
    fn test_rag_messages_embed_ground_truth() {
        let messages = AnswerClient::build_messages(&item(), ExperimentMode::RagAssisted);
        assert_eq!(messages[0].content, prompts::RAG_ASSISTED_SYSTEM_PROMPT);
        assert_eq!(
            messages[1].content,
            "CONTEXT:\n---\nHanoi is the capital of Vietnam.\n---\n\n\
             QUESTION: What is the capital of Vietnam?"
        );
    }

    #[tokio::test]
    async fn test_answer_returns_first_choice_content() {
        let provider = Arc::new(RecordingProvider::replying("<english_answer>Hanoi</english_answer>"));
        let client = AnswerClient::new(provider.clone(), CompletionConfig::new("sonar"));

        let answer = client.answer(&item(), ExperimentMode::PromptTuned).await;
        assert_eq!(answer, "<english_answer>Hanoi</english_answer>");

        let (messages, config) = provider.seen.lock().unwrap().clone().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(config.model, "sonar");
        assert_eq!(config.temperature, None);
    }

    #[tokio::test]
    async fn test_answer_failure_becomes_error_text() {
        let provider = Arc::new(RecordingProvider::failing(503));
        let client = AnswerClient::new(provider, CompletionConfig::new("sonar"));

        let answer = client.answer(&item(), ExperimentMode::Baseline).await;
        assert!(!answer.is_empty());
        assert!(answer.contains("An unexpected error occurred in perplexity query"));
        assert!(answer.contains("503"));
        assert!(answer.contains("upstream unavailable"));
    }
}
