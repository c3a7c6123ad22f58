use std::collections::HashMap;

use serde::Serialize;

use crate::rules::Rules;
use crate::text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordEntry {
    pub word: String,
    pub count: usize,
    /// Share of `total_words`, as a percentage.
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordDensityResult {
    pub keywords: HashMap<String, usize>,
    pub top_keywords: Vec<KeywordEntry>,
    /// Tokens left after stop-word and length filtering.
    pub total_words: usize,
}

/// Frequency of content words in normalized text, with the `top_n` most frequent ranked.
/// Ties keep first-seen order.
pub fn analyze(text: &str, top_n: usize, rules: &Rules) -> KeywordDensityResult {
    let tokens = text::content_tokens(text, rules);
    let total_words = tokens.len();

    let mut keywords: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for token in tokens {
        let count = keywords.entry(token.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(token);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|word| {
            let count = keywords[&word];
            (word, count)
        })
        .collect();
    // sort_by is stable, so equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    let top_keywords = ranked
        .into_iter()
        .map(|(word, count)| KeywordEntry {
            word,
            count,
            density: count as f64 * 100.0 / total_words as f64,
        })
        .collect();

    KeywordDensityResult {
        keywords,
        top_keywords,
        total_words,
    }
}
