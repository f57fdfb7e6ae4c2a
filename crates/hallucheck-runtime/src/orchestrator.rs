//! Concurrent evaluation of a whole dataset.
//!
//! The orchestrator implements:
//! - Fan-out: one task per item, each running answer query then verdict query
//! - Join: waits for every task, no task cancels another
//! - Ordered fan-in: results come back in dataset order, whatever order
//!   the tasks finished in

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use hallucheck_core::{EvaluationResult, ExperimentMode, QaItem};

use crate::answer::AnswerClient;
use crate::config::{ConfigError, RuntimeConfig};
use crate::judge::VerdictClient;
use crate::progress::ProgressNotifier;
use crate::providers::{ChatCompletionsProvider, CompletionConfig, Credentials, LlmProvider};
use crate::summary::EvaluationSummary;

/// Runs answer + verdict pairs for every item of a dataset.
///
/// # Architecture
/// - All tasks share the providers (and through them one HTTP connection pool)
/// - Tasks are polled cooperatively on the calling task; nothing is spawned
/// - `max_concurrency = None` launches every item at once; `Some(n)` keeps
///   at most `n` items in flight
pub struct Evaluator {
    answers: AnswerClient,
    verdicts: VerdictClient,
    max_concurrency: Option<usize>,
}

impl Evaluator {
    /// Create an evaluator with unbounded fan-out.
    pub fn new(answers: AnswerClient, verdicts: VerdictClient) -> Self {
        Self {
            answers,
            verdicts,
            max_concurrency: None,
        }
    }

    /// Wire real HTTP providers from configuration and credentials.
    ///
    /// Both providers clone the same `reqwest::Client`, so every request of
    /// the run goes through one connection pool.
    pub fn from_config(
        config: &RuntimeConfig,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let (answer_key, judge_key) = credentials.into_parts();

        let answerer = Arc::new(ChatCompletionsProvider::new(
            "answerer",
            config.answerer.url.as_str(),
            answer_key,
            client.clone(),
        ));
        let judge = Arc::new(ChatCompletionsProvider::new(
            "judge",
            config.judge.url.as_str(),
            judge_key,
            client,
        ));

        EvaluatorBuilder::new()
            .answerer(answerer, config.answerer.completion_config())
            .judge(judge, config.judge.completion_config())
            .max_concurrency(config.max_concurrency)
            .build()
    }

    /// Bound the number of items in flight.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.max(1));
        self
    }

    /// Configured concurrency limit.
    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Evaluate one item: answer query, then verdict query on that answer.
    pub async fn evaluate_item(&self, item: QaItem, mode: ExperimentMode) -> EvaluationResult {
        let model_answer = self.answers.answer(&item, mode).await;
        let is_hallucination = self
            .verdicts
            .is_hallucination(&item.question, &item.answer, &model_answer)
            .await;

        EvaluationResult::new(item, model_answer, is_hallucination)
    }

    /// Evaluate every item and summarise.
    ///
    /// Returns only after all items have finished. Results are in the same
    /// order as `items`.
    pub async fn evaluate(
        &self,
        items: Vec<QaItem>,
        mode: ExperimentMode,
        notifier: &dyn ProgressNotifier,
    ) -> EvaluationSummary {
        let start = Instant::now();
        let total = items.len();

        tracing::info!(
            total,
            mode = %mode,
            max_concurrency = ?self.max_concurrency,
            "Starting evaluation"
        );
        notifier.on_start(total, mode);

        let completed = AtomicUsize::new(0);
        let completed = &completed;

        let tasks = items.into_iter().map(move |item| async move {
            let result = self.evaluate_item(item, mode).await;
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            notifier.on_item_complete(done, total, result.is_hallucination);
            result
        });

        // Both paths preserve input order.
        let results: Vec<EvaluationResult> = match self.max_concurrency {
            None => join_all(tasks).await,
            Some(limit) => stream::iter(tasks).buffered(limit).collect().await,
        };

        notifier.on_finish();

        let summary = EvaluationSummary::from_results(mode, results, start.elapsed());
        tracing::info!(
            total = summary.total,
            hallucinations = summary.hallucinations,
            rate = summary.rate,
            elapsed_secs = summary.elapsed_secs,
            "Evaluation finished"
        );
        summary
    }
}

/// Builder for [`Evaluator`].
#[derive(Default)]
pub struct EvaluatorBuilder {
    answerer: Option<(Arc<dyn LlmProvider>, CompletionConfig)>,
    judge: Option<(Arc<dyn LlmProvider>, CompletionConfig)>,
    max_concurrency: Option<usize>,
}

impl EvaluatorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model under evaluation.
    pub fn answerer(mut self, provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        self.answerer = Some((provider, config));
        self
    }

    /// Set the fact-checking model.
    pub fn judge(mut self, provider: Arc<dyn LlmProvider>, config: CompletionConfig) -> Self {
        self.judge = Some((provider, config));
        self
    }

    /// Bound the number of items in flight (`None` for no bound).
    pub fn max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Build the evaluator.
    pub fn build(self) -> Result<Evaluator, ConfigError> {
        let (answer_provider, answer_config) =
            self.answerer.ok_or_else(|| ConfigError::InvalidValue {
                field: "answerer",
                reason: "no provider set".to_string(),
            })?;
        let (judge_provider, judge_config) =
            self.judge.ok_or_else(|| ConfigError::InvalidValue {
                field: "judge",
                reason: "no provider set".to_string(),
            })?;

        Ok(Evaluator::new(
            AnswerClient::new(answer_provider, answer_config),
            VerdictClient::new(judge_provider, judge_config),
        )
        .with_max_concurrency(self.max_concurrency))
    }
}
