use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Sum of the built-in check weights.
pub const DEFAULT_TOTAL_WEIGHT: u32 = 110;

// ---------------------------------------------------------------------------
// Stopwords
// ---------------------------------------------------------------------------

pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don't", "down", "during", "each", "even", "every", "few", "for",
    "from", "further", "get", "got", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however",
    "i", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "let's", "like",
    "may", "me", "might", "more", "most", "much", "must", "my", "myself", "no", "nor", "not",
    "now", "of", "off", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "same", "she", "should", "shouldn't", "since", "so", "some", "still",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they're", "this", "those", "through", "to", "too",
    "under", "until", "up", "upon", "us", "very", "was", "wasn't", "we", "we're", "were",
    "weren't", "what", "what's", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "within", "without", "won't", "would", "wouldn't", "yet", "you", "you're", "your",
    "yours", "yourself", "yourselves",
];

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Points each check contributes when it passes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckWeights {
    pub word_count: u32,
    pub headings: u32,
    pub images: u32,
    pub links: u32,
    pub title_length: u32,
    pub meta_description: u32,
    pub slug: u32,
    pub meta_keywords: u32,
    pub title_keyword: u32,
    pub content_keyword: u32,
    pub paragraph_length: u32,
}

impl Default for CheckWeights {
    fn default() -> Self {
        Self {
            word_count: 15,
            headings: 10,
            images: 10,
            links: 5,
            title_length: 10,
            meta_description: 10,
            slug: 5,
            meta_keywords: 10,
            title_keyword: 8,
            content_keyword: 7,
            paragraph_length: 10,
        }
    }
}

impl CheckWeights {
    fn as_array(&self) -> [(&'static str, u32); 11] {
        [
            ("word_count", self.word_count),
            ("headings", self.headings),
            ("images", self.images),
            ("links", self.links),
            ("title_length", self.title_length),
            ("meta_description", self.meta_description),
            ("slug", self.slug),
            ("meta_keywords", self.meta_keywords),
            ("title_keyword", self.title_keyword),
            ("content_keyword", self.content_keyword),
            ("paragraph_length", self.paragraph_length),
        ]
    }

    /// `None` when the weights overflow `u32`.
    pub fn checked_total(&self) -> Option<u32> {
        self.as_array()
            .iter()
            .try_fold(0u32, |acc, (_, w)| acc.checked_add(*w))
    }

    /// Saturates instead of overflowing; validated rules never reach the cap.
    pub fn total(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Range {
    pub min: usize,
    pub max: usize,
}

impl Range {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Lower bounds of the Excellent, Good and Fair levels; anything below `fair` is Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LevelBands {
    pub excellent: u32,
    pub good: u32,
    pub fair: u32,
}

impl Default for LevelBands {
    fn default() -> Self {
        Self {
            excellent: 80,
            good: 60,
            fair: 40,
        }
    }
}

/// Static configuration for a scoring run. Built once, shared read-only by every call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub min_word_count: u64,
    pub title_length: Range,
    pub meta_description_length: Range,
    pub min_links: usize,
    pub min_meta_keywords: usize,
    pub content_keyword_occurrences: Range,
    /// Keywords at or below this length never count as the primary keyword.
    pub min_primary_keyword_len: usize,
    pub max_avg_paragraph_words: f64,
    /// Density tokens at or below this length are dropped.
    pub min_token_len: usize,
    pub top_keywords: usize,
    pub weights: CheckWeights,
    pub levels: LevelBands,
    pub stop_words: HashSet<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_word_count: 300,
            title_length: Range::new(30, 60),
            meta_description_length: Range::new(120, 160),
            min_links: 2,
            min_meta_keywords: 3,
            content_keyword_occurrences: Range::new(2, 10),
            min_primary_keyword_len: 2,
            max_avg_paragraph_words: 100.0,
            min_token_len: 2,
            top_keywords: 10,
            weights: CheckWeights::default(),
            levels: LevelBands::default(),
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Rules {
    pub fn total_weight(&self) -> u32 {
        self.weights.total()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Parse a partial override; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((name, _)) = self.weights.as_array().iter().find(|(_, w)| *w == 0) {
            return Err(Error::InvalidRules(format!("weight `{name}` must be positive")));
        }
        if self.weights.checked_total().is_none() {
            return Err(Error::InvalidRules(
                "check weights overflow when summed".to_string(),
            ));
        }
        for (name, range) in [
            ("title_length", self.title_length),
            ("meta_description_length", self.meta_description_length),
            ("content_keyword_occurrences", self.content_keyword_occurrences),
        ] {
            if range.min > range.max {
                return Err(Error::InvalidRules(format!(
                    "`{name}` min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        let LevelBands {
            excellent,
            good,
            fair,
        } = self.levels;
        if !(excellent > good && good > fair && excellent <= 100) {
            return Err(Error::InvalidRules(format!(
                "level bands must satisfy 100 >= excellent > good > fair, got {excellent}/{good}/{fair}"
            )));
        }
        if !self.max_avg_paragraph_words.is_finite() || self.max_avg_paragraph_words <= 0.0 {
            return Err(Error::InvalidRules(
                "`max_avg_paragraph_words` must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_110() {
        assert_eq!(Rules::default().total_weight(), DEFAULT_TOTAL_WEIGHT);
    }

    #[test]
    fn default_rules_are_valid() {
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn stop_word_list_is_about_150_entries() {
        let unique: HashSet<_> = STOP_WORDS.iter().collect();
        assert_eq!(unique.len(), STOP_WORDS.len(), "duplicate stop word");
        assert!((140..=180).contains(&STOP_WORDS.len()));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let rules = Rules::from_json_str(r#"{"min_word_count": 600, "weights": {"slug": 20}}"#)
            .unwrap();
        assert_eq!(rules.min_word_count, 600);
        assert_eq!(rules.weights.slug, 20);
        assert_eq!(rules.weights.word_count, 15);
        assert_eq!(rules.title_length, Range::new(30, 60));
        assert!(rules.is_stop_word("the"));
    }

    #[test]
    fn rejects_zero_weight() {
        let err = Rules::from_json_str(r#"{"weights": {"links": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("links"), "got: {err}");
    }

    #[test]
    fn rejects_inverted_range() {
        let err =
            Rules::from_json_str(r#"{"title_length": {"min": 70, "max": 60}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidRules(_)));
    }

    #[test]
    fn rejects_unordered_levels() {
        let err = Rules::from_json_str(r#"{"levels": {"excellent": 50, "good": 60, "fair": 40}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRules(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(Rules::from_json_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn rejects_weights_whose_sum_overflows() {
        let err = Rules::from_json_str(r#"{"weights": {"word_count": 4294967295}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidRules(_)));
        assert!(err.to_string().contains("overflow"), "got: {err}");
    }

    #[test]
    fn large_weights_that_fit_are_accepted() {
        let rules = Rules::from_json_str(r#"{"weights": {"word_count": 4294967000}}"#).unwrap();
        assert_eq!(rules.total_weight(), 4294967000 + 95);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Rules::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
