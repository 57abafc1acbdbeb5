//! Prompt construction for the AI provider.

use crate::constants::{FIELD_MOOD, FIELD_SCORE, FIELD_SUGGESTION, FIELD_SUMMARY};

/// Builds the mood analysis prompt over the combined entry text.
///
/// The reply format is prescriptive on purpose: the parser scans for these
/// exact line prefixes, and models follow the template far more reliably
/// when it is spelled out verbatim.
pub fn summary_prompt(combined_text: &str) -> String {
    format!(
        "You are a personal mental wellness assistant.\n\
         Analyze the user's journal entries and respond STRICTLY in this format:\n\
         \n\
         {FIELD_MOOD} <one word describing the overall mood>\n\
         {FIELD_SCORE} <mood score from 1 to 10>\n\
         {FIELD_SUMMARY} <2-3 lines summarizing the entries>\n\
         {FIELD_SUGGESTION} <one practical suggestion>\n\
         \n\
         Journal entries:\n\
         {combined_text}"
    )
}

/// Builds the free-form question prompt over the combined entry text.
pub fn question_prompt(combined_text: &str, question: &str) -> String {
    format!(
        "You are a personal mental wellness assistant.\n\
         Use the user's journal entries below to answer their question.\n\
         Keep the answer short and grounded in what the entries actually say.\n\
         \n\
         Question: {question}\n\
         \n\
         Journal entries:\n\
         {combined_text}"
    )
}
