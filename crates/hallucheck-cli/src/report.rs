//! Console rendering of evaluation results

use colored::Colorize;
use hallucheck_core::EvaluationResult;
use hallucheck_runtime::EvaluationSummary;

/// Characters of the question shown per line in the compact list
const QUESTION_PREVIEW_CHARS: usize = 80;

/// Formats evaluation summaries for the terminal
pub struct ConsoleReport;

impl ConsoleReport {
    /// Per-item list followed by the summary block.
    pub fn format(summary: &EvaluationSummary, verbose: bool) -> String {
        let mut output = if verbose {
            Self::format_detailed(&summary.results)
        } else {
            Self::format_compact(&summary.results)
        };
        output.push_str(&Self::format_summary(summary));
        output
    }

    /// Every field of every item.
    pub fn format_detailed(results: &[EvaluationResult]) -> String {
        let mut output = Self::section_header("Detailed Results");

        for (i, result) in results.iter().enumerate() {
            let title = format!("── Q{} ──", i + 1);
            let title = if result.is_hallucination {
                title.red().bold()
            } else {
                title.green().bold()
            };
            output.push_str(&format!("\n{title}\n"));
            output.push_str(&format!(
                "{} {}\n",
                "Question:      ".cyan().bold(),
                result.item.question
            ));
            output.push_str(&format!(
                "{} {}\n",
                "Ground Truth:  ".green().bold(),
                result.item.answer
            ));
            output.push_str(&format!("{}\n", "Model Answer:".bold()));
            output.push_str(&Self::indent(&result.model_answer, "    "));
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "Hallucination?".magenta().bold(),
                Self::verdict_label(result.is_hallucination)
            ));
        }

        output
    }

    /// One pass/fail line per item.
    pub fn format_compact(results: &[EvaluationResult]) -> String {
        let mut output = format!("\n{}\n", "Quick Results:".bold());

        for (i, result) in results.iter().enumerate() {
            let status = if result.is_hallucination {
                "✖ FAIL".red().bold()
            } else {
                "✔ PASS".green().bold()
            };
            output.push_str(&format!(
                "{status} - Q{}: {}...\n",
                i + 1,
                Self::preview(&result.item.question)
            ));
        }

        output
    }

    /// Totals, rate and (for tagged modes) format compliance.
    pub fn format_summary(summary: &EvaluationSummary) -> String {
        let mut output = format!("\n{}\n\n", "=".repeat(40));

        output.push_str(&format!(
            "{}\n",
            format!("Final Report ({})", summary.mode).cyan().bold()
        ));
        output.push_str(&format!(
            "{:<32}{}\n",
            "Total Questions Evaluated:", summary.total
        ));
        output.push_str(&format!(
            "{:<32}{}\n",
            "Total Hallucinations Detected:", summary.hallucinations
        ));
        output.push_str(&format!(
            "{}{}\n",
            format!("{:<32}", "Hallucination Rate:").yellow().bold(),
            summary.rate_display().yellow().bold()
        ));

        if let Some(compliance) = summary.format_compliance {
            output.push_str(&format!(
                "{:<32}{:.2}%\n",
                "Format Compliance:", compliance
            ));
        }

        output.push_str(&format!(
            "{}\n",
            format!("Completed in {:.1}s", summary.elapsed_secs).dimmed()
        ));

        output
    }

    /// First characters of `question`, never splitting a character.
    pub fn preview(question: &str) -> &str {
        match question.char_indices().nth(QUESTION_PREVIEW_CHARS) {
            Some((end, _)) => &question[..end],
            None => question,
        }
    }

    fn verdict_label(is_hallucination: bool) -> colored::ColoredString {
        if is_hallucination {
            "YES".red().bold()
        } else {
            "NO".green().bold()
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{prefix}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hallucheck_core::{ExperimentMode, QaItem};
    use std::time::Duration;

    fn summary(mode: ExperimentMode) -> EvaluationSummary {
        EvaluationSummary::from_results(
            mode,
            vec![
                EvaluationResult::new(
                    QaItem::new("What is the capital of France?", "Paris"),
                    "Lyon\nis the capital",
                    true,
                ),
                EvaluationResult::new(QaItem::new("Thủ đô của Việt Nam là gì?", "Hà Nội"), "Hà Nội", false),
            ],
            Duration::from_millis(2500),
        )
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "ệ".repeat(100);
        let preview = ConsoleReport::preview(&long);
        assert_eq!(preview.chars().count(), 80);

        assert_eq!(ConsoleReport::preview("short"), "short");
    }

    #[test]
    fn test_compact_lines() {
        let output = ConsoleReport::format_compact(&summary(ExperimentMode::Baseline).results);
        assert!(output.contains("✖ FAIL"));
        assert!(output.contains("✔ PASS"));
        assert!(output.contains(" - Q1: What is the capital of France?..."));
        assert!(output.contains(" - Q2: Thủ đô của Việt Nam là gì?..."));
    }

    #[test]
    fn test_detailed_shows_every_field() {
        let output = ConsoleReport::format_detailed(&summary(ExperimentMode::Baseline).results);
        assert!(output.contains("What is the capital of France?"));
        assert!(output.contains("Paris"));
        assert!(output.contains("    Lyon\n    is the capital"));
        assert!(output.contains("YES"));
        assert!(output.contains("NO"));
    }

    #[test]
    fn test_summary_block() {
        let output = ConsoleReport::format_summary(&summary(ExperimentMode::Baseline));
        assert!(output.contains("Final Report (baseline)"));
        assert!(output.contains("Total Questions Evaluated:      2"));
        assert!(output.contains("Total Hallucinations Detected:  1"));
        assert!(output.contains("50.00%"));
        assert!(!output.contains("Format Compliance"));
    }

    #[test]
    fn test_summary_shows_compliance_for_tagged_modes() {
        let output = ConsoleReport::format_summary(&summary(ExperimentMode::PromptTuned));
        assert!(output.contains("Format Compliance:"));
        assert!(output.contains("0.00%"));
    }

    #[test]
    fn test_format_switches_on_verbose() {
        let s = summary(ExperimentMode::Baseline);
        assert!(ConsoleReport::format(&s, false).contains("Quick Results:"));
        assert!(ConsoleReport::format(&s, true).contains("Detailed Results"));
    }
}
