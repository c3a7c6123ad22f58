use std::fmt;

use serde::Serialize;

use crate::checklist::{self, CheckItem};
use crate::density::KeywordDensityResult;
use crate::readability::ReadabilityReport;
use crate::rules::{LevelBands, Rules};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Level {
    pub fn for_score(score: u32, bands: &LevelBands) -> Self {
        if score >= bands.excellent {
            Level::Excellent
        } else if score >= bands.good {
            Level::Good
        } else if score >= bands.fair {
            Level::Fair
        } else {
            Level::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Excellent => "Excellent",
            Level::Good => "Good",
            Level::Fair => "Fair",
            Level::Poor => "Poor",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted tally of a checklist run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub score: u32,
    pub level: Level,
    pub earned_weight: u32,
    pub total_weight: u32,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub level: Level,
    pub checklist: Vec<CheckItem>,
    pub keyword_density: KeywordDensityResult,
    pub suggestions: Vec<String>,
    pub readability: ReadabilityReport,
    pub earned_weight: u32,
    pub total_weight: u32,
}

impl ScoreResult {
    pub(crate) fn assemble(
        checklist: Vec<CheckItem>,
        aggregate: Aggregate,
        keyword_density: KeywordDensityResult,
        readability: ReadabilityReport,
    ) -> Self {
        Self {
            score: aggregate.score,
            level: aggregate.level,
            checklist,
            keyword_density,
            suggestions: aggregate.suggestions,
            readability,
            earned_weight: aggregate.earned_weight,
            total_weight: aggregate.total_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickItem {
    pub id: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickScore {
    pub score: u32,
    pub items: Vec<QuickItem>,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u32
}

/// Combine checklist results into a 0-100 score. The denominator is the configured
/// weight total, not the sum over `checks`.
pub fn aggregate(checks: &[CheckItem], rules: &Rules) -> Aggregate {
    let total_weight = rules.total_weight();
    let earned_weight = checks
        .iter()
        .filter(|c| c.passed)
        .fold(0u32, |acc, c| acc.saturating_add(c.weight));
    let score = percentage(earned_weight, total_weight).min(100);
    let suggestions = checks
        .iter()
        .filter(|c| !c.passed)
        .filter_map(|c| c.suggestion.clone())
        .collect();

    Aggregate {
        score,
        level: Level::for_score(score, &rules.levels),
        earned_weight,
        total_weight,
        suggestions,
    }
}

/// Coarse, unweighted four-item score for interactive use. Independent of [`aggregate`];
/// the two need not agree.
pub fn quick(
    title: &str,
    content: &str,
    meta_description: &str,
    word_count: u64,
    rules: &Rules,
) -> QuickScore {
    let items = vec![
        QuickItem {
            id: "title-length".to_string(),
            passed: rules.title_length.contains(checklist::char_len(title)),
        },
        QuickItem {
            id: "meta-description".to_string(),
            passed: rules
                .meta_description_length
                .contains(checklist::char_len(meta_description)),
        },
        QuickItem {
            id: "word-count".to_string(),
            passed: word_count >= rules.min_word_count,
        },
        QuickItem {
            id: "headings".to_string(),
            passed: checklist::has_h1(content) && checklist::has_h2(content),
        },
    ];
    let passed = items.iter().filter(|i| i.passed).count() as u32;
    QuickScore {
        score: percentage(passed, items.len() as u32),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Category;

    fn check(id: &str, weight: u32, passed: bool) -> CheckItem {
        CheckItem {
            id: id.to_string(),
            label: id.to_string(),
            passed,
            weight,
            category: Category::Content,
            suggestion: (!passed).then(|| format!("fix {id}")),
        }
    }

    #[test]
    fn level_bands() {
        let bands = LevelBands::default();
        assert_eq!(Level::for_score(100, &bands), Level::Excellent);
        assert_eq!(Level::for_score(80, &bands), Level::Excellent);
        assert_eq!(Level::for_score(79, &bands), Level::Good);
        assert_eq!(Level::for_score(60, &bands), Level::Good);
        assert_eq!(Level::for_score(59, &bands), Level::Fair);
        assert_eq!(Level::for_score(40, &bands), Level::Fair);
        assert_eq!(Level::for_score(39, &bands), Level::Poor);
        assert_eq!(Level::for_score(0, &bands), Level::Poor);
    }

    #[test]
    fn level_serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Level::Excellent).unwrap(), "\"Excellent\"");
        assert_eq!(Level::Fair.to_string(), "Fair");
    }

    #[test]
    fn score_uses_configured_total() {
        let rules = Rules::default();
        // 55 of 110 earned
        let checks = vec![check("a", 15, true), check("b", 40, true), check("c", 55, false)];
        let agg = aggregate(&checks, &rules);
        assert_eq!(agg.earned_weight, 55);
        assert_eq!(agg.total_weight, 110);
        assert_eq!(agg.score, 50);
        assert_eq!(agg.level, Level::Fair);
    }

    #[test]
    fn score_rounds_to_nearest() {
        let rules = Rules::default();
        // 15/110 = 13.6 -> 14
        let agg = aggregate(&[check("a", 15, true)], &rules);
        assert_eq!(agg.score, 14);
        // 5/110 = 4.55 -> 5
        let agg = aggregate(&[check("a", 5, true)], &rules);
        assert_eq!(agg.score, 5);
    }

    #[test]
    fn oversized_weights_do_not_panic() {
        let mut rules = Rules::default();
        rules.weights.word_count = u32::MAX;
        let checks = vec![check("a", u32::MAX, true), check("b", 10, true)];
        let agg = aggregate(&checks, &rules);
        assert_eq!(agg.total_weight, u32::MAX);
        assert!(agg.score <= 100);
    }

    #[test]
    fn suggestions_follow_check_order_and_skip_absent() {
        let mut silent = check("b", 10, false);
        silent.suggestion = None;
        let checks = vec![
            check("a", 10, false),
            silent,
            check("c", 10, true),
            check("d", 10, false),
        ];
        let agg = aggregate(&checks, &Rules::default());
        assert_eq!(agg.suggestions, vec!["fix a", "fix d"]);
    }

    #[test]
    fn quick_score_counts_four_items() {
        let result = quick("", "", "", 0, &Rules::default());
        assert_eq!(result.score, 0);
        let ids: Vec<&str> = result.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["title-length", "meta-description", "word-count", "headings"]);

        let result = quick(
            &"t".repeat(40),
            "<h1>a</h1><h2>b</h2>",
            &"d".repeat(130),
            300,
            &Rules::default(),
        );
        assert_eq!(result.score, 100);
    }

    #[test]
    fn quick_score_halves() {
        let result = quick(&"t".repeat(40), "<h2>b</h2>", "", 1000, &Rules::default());
        assert_eq!(result.score, 50);
    }
}
