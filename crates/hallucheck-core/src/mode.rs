//! Experiment modes and the prompt table that drives them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::prompts::{
    BASELINE_SYSTEM_PROMPT, PROMPT_TUNED_SYSTEM_PROMPT, RAG_ASSISTED_SYSTEM_PROMPT,
};

/// Prompting strategy used for the answering model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperimentMode {
    /// Plain answer plus translation
    #[default]
    Baseline,
    /// Strict tagged two-section format with a worked example
    PromptTuned,
    /// Tagged format, answered only from the supplied context
    RagAssisted,
}

/// How a mode shapes the answering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    /// The mode this row describes
    pub mode: ExperimentMode,

    /// System prompt sent ahead of the user message
    pub system_prompt: &'static str,

    /// Whether the ground-truth answer is embedded as context in the user message
    pub embeds_context: bool,

    /// Whether the answer is expected to carry the tagged sections
    pub expects_tagged_sections: bool,
}

/// One row per mode. New modes are added here.
pub const MODE_PROFILES: &[ModeProfile] = &[
    ModeProfile {
        mode: ExperimentMode::Baseline,
        system_prompt: BASELINE_SYSTEM_PROMPT,
        embeds_context: false,
        expects_tagged_sections: false,
    },
    ModeProfile {
        mode: ExperimentMode::PromptTuned,
        system_prompt: PROMPT_TUNED_SYSTEM_PROMPT,
        embeds_context: false,
        expects_tagged_sections: true,
    },
    ModeProfile {
        mode: ExperimentMode::RagAssisted,
        system_prompt: RAG_ASSISTED_SYSTEM_PROMPT,
        embeds_context: true,
        expects_tagged_sections: true,
    },
];

impl ExperimentMode {
    /// All modes, in table order.
    pub fn all() -> impl Iterator<Item = ExperimentMode> {
        MODE_PROFILES.iter().map(|p| p.mode)
    }

    /// The canonical name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentMode::Baseline => "baseline",
            ExperimentMode::PromptTuned => "prompt-tuned",
            ExperimentMode::RagAssisted => "rag-assisted",
        }
    }

    /// Look up this mode's row in [`MODE_PROFILES`].
    pub fn profile(&self) -> &'static ModeProfile {
        MODE_PROFILES
            .iter()
            .find(|p| p.mode == *self)
            .unwrap_or(&MODE_PROFILES[0])
    }

    /// System prompt for this mode.
    pub fn system_prompt(&self) -> &'static str {
        self.profile().system_prompt
    }
}

impl fmt::Display for ExperimentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown experiment mode '{given}' (expected one of: baseline, prompt-tuned, rag-assisted)")]
pub struct ModeParseError {
    /// The rejected input
    pub given: String,
}

impl FromStr for ExperimentMode {
    type Err = ModeParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExperimentMode::all()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModeParseError {
                given: s.to_string(),
            })
    }
}
