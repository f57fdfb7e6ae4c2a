//! Hallucination verdicts from the judge model.
//!
//! ## Fail-open policy
//!
//! When the judge cannot be reached or its reply cannot be read, the item is
//! counted as a hallucination. An unavailable judge therefore raises the
//! reported rate instead of silently passing answers nobody checked. This
//! conflates "judge down" with "answer wrong" and is a policy choice; the
//! failure is logged at `warn` so the two can be told apart afterwards.

use std::sync::Arc;

use hallucheck_core::prompts;

use crate::providers::{ChatMessage, CompletionConfig, LlmProvider};

/// `true` when the judge's reply flags a hallucination.
///
/// The reply is trimmed and upper-cased, then checked for `YES` anywhere in
/// it. Everything else, including `NO` and an empty reply, is `false`.
pub fn parse_verdict(content: &str) -> bool {
    content.trim().to_uppercase().contains("YES")
}

/// Asks the judge model whether an answer is a hallucination.
pub struct VerdictClient {
    provider: Arc<dyn LlmProvider>,
    config: CompletionConfig,
}

impl VerdictClient {
    /// Create a client for `provider` with per-request settings `config`.
    ///
    /// `config` should carry `temperature = 0` and a small `max_tokens`;
    /// [`crate::EndpointConfig::judge`] does.
    pub fn new(provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        Self { provider, config }
    }

    /// Single user message carrying the fact-checking prompt.
    pub fn build_messages(question: &str, ground_truth: &str, model_answer: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::user(prompts::judge_prompt(
            question,
            ground_truth,
            model_answer,
        ))]
    }

    /// Judge one answer. Any failure yields `true` (see module docs).
    pub async fn is_hallucination(
        &self,
        question: &str,
        ground_truth: &str,
        model_answer: &str,
    ) -> bool {
        let messages = Self::build_messages(question, ground_truth, model_answer);

        match self.provider.complete(messages, &self.config).await {
            Ok(response) => parse_verdict(&response.content),
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Fact-check failed, counting item as hallucination"
                );
                true
            }
        }
    }
}
