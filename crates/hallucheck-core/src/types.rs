//! Core data types shared by the loader, the runtime and the reports.

use serde::{Deserialize, Serialize};

/// A question with its reference answer.
///
/// The `answer` is the ground truth the judge compares against. In
/// rag-assisted mode it is also handed to the answering model as context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    /// The question put to the answering model
    pub question: String,

    /// Reference answer (ground truth)
    pub answer: String,
}

impl QaItem {
    /// Create a new item.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Outcome of evaluating one [`QaItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The evaluated item
    pub item: QaItem,

    /// Raw text returned by the answering model, or an inline error
    /// description when the answer query failed
    pub model_answer: String,

    /// Judge verdict: `true` means the answer was flagged as a hallucination
    pub is_hallucination: bool,
}

impl EvaluationResult {
    /// Create a new result.
    pub fn new(item: QaItem, model_answer: impl Into<String>, is_hallucination: bool) -> Self {
        Self {
            item,
            model_answer: model_answer.into(),
            is_hallucination,
        }
    }
}
