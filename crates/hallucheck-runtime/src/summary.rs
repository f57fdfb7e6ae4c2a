//! Aggregated outcome of an evaluation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use hallucheck_core::{
    hallucination_count, hallucination_rate, AnswerFormat, EvaluationResult, ExperimentMode,
};

/// Everything a report needs about one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Mode the run used
    pub mode: ExperimentMode,

    /// Number of items evaluated
    pub total: usize,

    /// Items the judge flagged
    pub hallucinations: usize,

    /// `100 * hallucinations / total`, `0.0` for an empty run
    pub rate: f64,

    /// Share of answers carrying both tagged sections, for modes that ask for them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_compliance: Option<f64>,

    /// Wall-clock time of the fan-out
    pub elapsed_secs: f64,

    /// When the run finished
    pub evaluated_at: DateTime<Utc>,

    /// Per-item results in dataset order
    pub results: Vec<EvaluationResult>,
}

impl EvaluationSummary {
    /// Build a summary from ordered results.
    pub fn from_results(mode: ExperimentMode, results: Vec<EvaluationResult>, elapsed: Duration) -> Self {
        let verdicts: Vec<bool> = results.iter().map(|r| r.is_hallucination).collect();

        let format_compliance = mode.profile().expects_tagged_sections.then(|| {
            if results.is_empty() {
                return 0.0;
            }
            let compliant = results
                .iter()
                .filter(|r| AnswerFormat::inspect(&r.model_answer).is_compliant())
                .count();
            100.0 * compliant as f64 / results.len() as f64
        });

        Self {
            mode,
            total: results.len(),
            hallucinations: hallucination_count(&verdicts),
            rate: hallucination_rate(&verdicts),
            format_compliance,
            elapsed_secs: elapsed.as_secs_f64(),
            evaluated_at: Utc::now(),
            results,
        }
    }

    /// Rate formatted with two decimals and a percent sign.
    pub fn rate_display(&self) -> String {
        format!("{:.2}%", self.rate)
    }

    /// Write the summary as pretty JSON.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
