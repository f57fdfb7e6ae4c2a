//! # hallucheck-core
//!
//! Data model and pure logic for measuring how often a hosted language
//! model hallucinates on a bilingual (English/Vietnamese) QA dataset.
//!
//! This crate answers:
//! - What is being asked? ([`QaItem`], loaded by [`QaDataset`])
//! - How is it asked? ([`ExperimentMode`] and its [`ModeProfile`])
//! - How bad was it? ([`hallucination_rate`])
//!
//! ## Key Guarantees
//!
//! 1. **No I/O beyond the dataset file**: network calls live in `hallucheck-runtime`
//! 2. **Tolerant loading**: a malformed line is logged and skipped, never fatal
//! 3. **Explicit mode table**: every mode is one row in [`MODE_PROFILES`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use hallucheck_core::{load_dataset, hallucination_rate};
//!
//! let items = load_dataset("data/qa.jsonl", Some(10))?;
//! let verdicts = vec![true, false];
//! println!("{:.2}%", hallucination_rate(&verdicts));
//! ```

pub mod dataset;
pub mod format;
pub mod metrics;
pub mod mode;
pub mod prompts;
pub mod types;

// Re-export main types at crate root
pub use dataset::{decode_line, parse_line, DatasetError, QaDataset, QaItems};
pub use format::AnswerFormat;
pub use metrics::{hallucination_count, hallucination_rate};
pub use mode::{ExperimentMode, ModeParseError, ModeProfile, MODE_PROFILES};
pub use types::{EvaluationResult, QaItem};

use std::path::Path;

/// Load a dataset into memory.
///
/// Fails with [`DatasetError::NotFound`] when `path` does not exist. With
/// `limit = Some(n)` only the first `n` valid records are kept.
pub fn load_dataset(path: impl AsRef<Path>, limit: Option<usize>) -> Result<Vec<QaItem>, DatasetError> {
    QaDataset::open(path)?.load(limit)
}
