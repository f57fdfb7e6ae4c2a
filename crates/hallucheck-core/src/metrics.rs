//! Aggregate metrics over judge verdicts.

/// Percentage of verdicts flagged as hallucinations.
///
/// Returns `100 * count(true) / len`, or `0.0` for an empty slice.
pub fn hallucination_rate(verdicts: &[bool]) -> f64 {
    if verdicts.is_empty() {
        return 0.0;
    }

    (hallucination_count(verdicts) as f64 / verdicts.len() as f64) * 100.0
}

/// Number of verdicts flagged as hallucinations.
pub fn hallucination_count(verdicts: &[bool]) -> usize {
    verdicts.iter().filter(|&&v| v).count()
}
