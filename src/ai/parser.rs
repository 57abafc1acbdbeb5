//! Lenient parsing of structured analysis replies.

use tracing::warn;

use crate::constants::{FIELD_MOOD, FIELD_SCORE, FIELD_SUGGESTION, FIELD_SUMMARY};

/// Structured mood analysis extracted from a provider reply.
///
/// `score` is kept exactly as the provider sent it; [`score_value`] coerces
/// it for storage and comparison.
///
/// [`score_value`]: AnalysisResult::score_value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// One-word mood label, empty when the reply omitted it.
    pub mood: String,
    /// Raw score text, empty when the reply omitted it.
    pub score: String,
    /// Short prose summary of the entries.
    pub summary: String,
    /// One practical suggestion.
    pub suggestion: String,
}

impl AnalysisResult {
    /// The score as an integer, defaulting to 0 when the provider sent
    /// nothing numeric.
    pub fn score_value(&self) -> i64 {
        self.score.trim().parse().unwrap_or(0)
    }
}

/// Extracts the four analysis fields from a raw provider reply.
///
/// The scan is deliberately tolerant of sloppy model output: it looks only
/// for the known line prefixes, strips surrounding whitespace from the
/// value, ignores lines it does not recognize, and leaves a field empty
/// when the reply omits it. When the same prefix appears twice, the last
/// occurrence wins. Missing fields are logged as a soft anomaly, never
/// surfaced as an error.
pub fn parse_analysis(reply: &str) -> AnalysisResult {
    let mut result = AnalysisResult::default();

    for line in reply.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix(FIELD_MOOD) {
            result.mood = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(FIELD_SCORE) {
            result.score = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(FIELD_SUMMARY) {
            result.summary = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(FIELD_SUGGESTION) {
            result.suggestion = value.trim().to_string();
        }
    }

    let missing: Vec<&str> = [
        (FIELD_MOOD, &result.mood),
        (FIELD_SCORE, &result.score),
        (FIELD_SUMMARY, &result.summary),
        (FIELD_SUGGESTION, &result.suggestion),
    ]
    .iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(prefix, _)| *prefix)
    .collect();
    if !missing.is_empty() {
        warn!(?missing, "analysis reply is missing fields");
    }

    result
}
