//! Word frequency over the entry corpus.

use std::collections::HashMap;

/// The `limit` most frequent words across `texts`, lowercased.
///
/// Tokens are maximal runs of alphanumerics and underscores. Ties break
/// alphabetically so the ranking is stable across runs.
pub fn top_words(texts: &[&str], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokens(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}
