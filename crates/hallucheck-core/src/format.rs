//! Inspection of the tagged two-section answer format.
//!
//! Prompt-tuned and rag-assisted modes ask for an English answer inside
//! `<english_answer>` tags followed by a Vietnamese translation inside
//! `<vietnamese_translation>` tags. This module only reports whether those
//! sections are present; the judge's verdict is never altered by it.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Non-empty `<english_answer>...</english_answer>` section
    static ref ENGLISH_SECTION: Regex = Regex::new(
        r"(?is)<english_answer>\s*\S.*?</english_answer>"
    ).unwrap();

    /// Non-empty `<vietnamese_translation>...</vietnamese_translation>` section
    static ref VIETNAMESE_SECTION: Regex = Regex::new(
        r"(?is)<vietnamese_translation>\s*\S.*?</vietnamese_translation>"
    ).unwrap();
}

/// Which of the tagged sections an answer contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerFormat {
    pub has_english_section: bool,
    pub has_vietnamese_section: bool,
}

impl AnswerFormat {
    /// Inspect a model answer.
    pub fn inspect(answer: &str) -> Self {
        Self {
            has_english_section: ENGLISH_SECTION.is_match(answer),
            has_vietnamese_section: VIETNAMESE_SECTION.is_match(answer),
        }
    }

    /// Both sections present.
    pub fn is_compliant(&self) -> bool {
        self.has_english_section && self.has_vietnamese_section
    }
}
