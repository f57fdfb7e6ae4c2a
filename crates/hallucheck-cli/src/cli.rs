//! CLI argument definitions

use clap::Parser;
use hallucheck_core::ExperimentMode;
use std::path::PathBuf;

/// CLI arguments for hallucheck
#[derive(Parser, Debug)]
#[command(name = "hallucheck")]
#[command(author, version, about = "Measure how often a hosted LLM hallucinates on a bilingual QA set")]
#[command(long_about = r#"
hallucheck asks a model every question of a JSONL dataset, has a second
model judge each answer against the ground truth, and reports the share of
answers judged to be hallucinations.

Modes:
  baseline       plain question, short system prompt
  prompt-tuned   strict bilingual answer format with a worked example
  rag-assisted   the ground truth is sent as context with the question

API keys are read from the environment:
  PPLX_KEY        answering model
  GPT4O_MINI_KEY  judge model

Logging goes to stderr and follows RUST_LOG (default: warn).

Example:
  hallucheck --mode rag-assisted --data data/qa.jsonl --limit 20 -v
"#)]
pub struct Cli {
    /// Prompting strategy (case-insensitive)
    #[arg(short, long, default_value = "baseline", value_name = "MODE")]
    pub mode: ExperimentMode,

    /// Path to the JSONL dataset
    #[arg(short, long = "data", default_value = "data/qa.jsonl", value_name = "PATH")]
    pub data_path: PathBuf,

    /// Evaluate only the first N items (N <= 0 means all)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true, value_name = "N")]
    pub limit: i64,

    /// Show every question, ground truth and answer
    #[arg(short, long)]
    pub verbose: bool,

    /// YAML runtime configuration (endpoints, models, timeouts)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum number of items evaluated at once (default: all)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Also write the summary and per-item results as JSON
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// `Some(n)` for a positive limit, `None` otherwise.
    pub fn item_limit(&self) -> Option<usize> {
        (self.limit > 0).then(|| self.limit as usize)
    }
}
