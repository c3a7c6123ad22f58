//! On-page content scoring.
//!
//! A [`Document`] runs through a fixed, weighted checklist and comes back as a
//! [`ScoreResult`]: a 0-100 score, a level, per-check results, keyword density,
//! reading ease and remediation suggestions. Scoring is a pure function of the
//! document and the [`Rules`]; it performs no I/O and never fails.

pub mod checklist;
pub mod density;
pub mod document;
pub mod error;
pub mod readability;
pub mod rules;
pub mod score;
pub mod text;

use once_cell::sync::Lazy;

pub use checklist::{Category, CheckItem};
pub use density::{KeywordDensityResult, KeywordEntry};
pub use document::Document;
pub use error::{Error, Result};
pub use readability::ReadabilityReport;
pub use rules::{Rules, DEFAULT_TOTAL_WEIGHT};
pub use score::{Level, QuickItem, QuickScore, ScoreResult};

static DEFAULT_SCORER: Lazy<Scorer> = Lazy::new(Scorer::default);

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Scores documents against one validated set of [`Rules`]. Cheap to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    rules: Rules,
}

impl Scorer {
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Full weighted evaluation with the `top_keywords` most frequent words ranked.
    #[tracing::instrument(skip_all, fields(title = %document.title, top_keywords = top_keywords))]
    pub fn score(&self, document: &Document, top_keywords: usize) -> ScoreResult {
        let plain = text::normalize(&document.content);

        let readability = readability::analyze(&plain);
        let keyword_density = density::analyze(&plain, top_keywords, &self.rules);

        let ctx = checklist::CheckContext::new(document, &plain);
        let checks = checklist::evaluate(&ctx, &self.rules);
        let aggregate = score::aggregate(&checks, &self.rules);

        tracing::debug!(
            score = aggregate.score,
            level = %aggregate.level,
            failed = aggregate.suggestions.len(),
            "document scored"
        );

        ScoreResult::assemble(checks, aggregate, keyword_density, readability)
    }

    /// [`Scorer::score`] with the configured default number of top keywords.
    pub fn score_default(&self, document: &Document) -> ScoreResult {
        self.score(document, self.rules.top_keywords)
    }

    #[tracing::instrument(skip_all, fields(word_count = word_count))]
    pub fn quick_score(
        &self,
        title: &str,
        content: &str,
        meta_description: &str,
        word_count: u64,
    ) -> QuickScore {
        let result = score::quick(title, content, meta_description, word_count, &self.rules);
        tracing::debug!(score = result.score, "quick score");
        result
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score `document` with the built-in rules.
pub fn score_document(document: &Document, top_keywords: usize) -> ScoreResult {
    DEFAULT_SCORER.score(document, top_keywords)
}

/// Coarse four-check score with the built-in rules.
pub fn quick_score(title: &str, content: &str, meta_description: &str, word_count: u64) -> QuickScore {
    DEFAULT_SCORER.quick_score(title, content, meta_description, word_count)
}
