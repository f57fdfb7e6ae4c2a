//! # hallucheck-runtime
//!
//! Network side of hallucheck: the answering model, the judge model and the
//! orchestrator that runs both over a dataset.
//!
//! ## Flow
//!
//! For every [`QaItem`](hallucheck_core::QaItem), concurrently:
//! 1. [`AnswerClient`] asks the model under evaluation, shaped by the
//!    [`ExperimentMode`](hallucheck_core::ExperimentMode)
//! 2. [`VerdictClient`] asks the judge whether that answer contradicts the
//!    ground truth
//!
//! [`Evaluator::evaluate`] waits for every item and returns an
//! [`EvaluationSummary`] with results in dataset order.
//!
//! ## Failure handling
//!
//! Nothing inside a run is fatal. A failed answer query becomes error text
//! that the judge then sees, and a failed verdict counts as a hallucination.
//! Only configuration and missing API keys stop a run, and both are checked
//! before any request is sent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use hallucheck_runtime::{Credentials, Evaluator, NoProgress, RuntimeConfig};
//!
//! let config = RuntimeConfig::default();
//! let credentials = Credentials::load(&config)?;
//! let evaluator = Evaluator::from_config(&config, credentials)?;
//!
//! let summary = evaluator.evaluate(items, ExperimentMode::RagAssisted, &NoProgress).await;
//! println!("{}", summary.rate_display());
//! ```

pub mod answer;
pub mod config;
pub mod judge;
pub mod orchestrator;
pub mod progress;
pub mod providers;
pub mod summary;

pub use answer::AnswerClient;
pub use config::{ConfigError, EndpointConfig, RuntimeConfig};
pub use judge::{parse_verdict, VerdictClient};
pub use orchestrator::{Evaluator, EvaluatorBuilder};
pub use progress::{NoProgress, ProgressNotifier};
pub use providers::{
    ApiCredential, ChatCompletionsProvider, ChatMessage, CompletionConfig, CompletionResponse,
    CredentialSource, Credentials, LlmProvider, ProviderError, TokenUsage,
};
pub use summary::EvaluationSummary;
