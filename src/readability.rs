//! Flesch Reading Ease.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`, clamped to `[0, 100]`.
//!
//! Higher is easier. Syllables come from [`text::count_syllables`], so treat the score
//! as directional rather than exact.

use serde::Serialize;

use crate::text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityReport {
    /// Reading ease in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

/// Reading ease of already-normalized plain text.
pub fn analyze(text: &str) -> ReadabilityReport {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let words = tokens.len();
    let sentences = text::sentences(text).len();
    let syllables: usize = tokens.iter().map(|w| text::count_syllables(w)).sum();

    let score = if words == 0 || sentences == 0 {
        0.0
    } else {
        let words_per_sentence = words as f64 / sentences as f64;
        let syllables_per_word = syllables as f64 / words as f64;
        let raw = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
        (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
    };

    ReadabilityReport {
        score,
        words,
        sentences,
        syllables,
    }
}

pub fn readability(text: &str) -> f64 {
    analyze(text).score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_prose_is_easy() {
        let report = analyze("The cat sat on the mat. The dog ran fast.");
        assert_eq!(report.words, 10);
        assert_eq!(report.sentences, 2);
        assert_eq!(report.syllables, 10);
        // 206.835 - 1.015 * 5 - 84.6 * 1 = 117.16, clamped
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn dense_prose_scores_lower() {
        let easy = readability("The cat sat on the mat. The dog ran fast.");
        let hard = readability(
            "The implementation of comprehensive organizational restructuring \
             necessitated establishing interdepartmental communication protocols \
             facilitating dissemination of procedural documentation.",
        );
        assert!(hard < easy, "hard={hard} easy={easy}");
        assert!((0.0..=100.0).contains(&hard));
    }

    #[test]
    fn empty_text_scores_zero() {
        let report = analyze("");
        assert_eq!(report.score, 0.0);
        assert_eq!(report.words, 0);
        assert_eq!(report.sentences, 0);
    }

    #[test]
    fn punctuation_only_scores_zero() {
        assert_eq!(readability("... !!! ???"), 0.0);
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        // Unterminated text is a single sentence, not zero. Only wordless input scores 0.
        let report = analyze("just some words here");
        assert_eq!(report.sentences, 1);
        assert!(report.score > 0.0);
    }
}
