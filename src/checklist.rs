use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::document::Document;
use crate::rules::{CheckWeights, Range, Rules};
use crate::text;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Content,
    Metadata,
    Structure,
    Readability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub id: String,
    pub label: String,
    pub passed: bool,
    pub weight: u32,
    pub category: Category,
    /// Present only on failed checks.
    pub suggestion: Option<String>,
}

/// What the checks see of one document. Derived text is computed once and shared.
pub struct CheckContext<'a> {
    pub doc: &'a Document,
    /// Normalized `content`.
    pub plain: &'a str,
    pub keywords: Vec<&'a str>,
    pub paragraphs: Vec<String>,
}

impl<'a> CheckContext<'a> {
    pub fn new(doc: &'a Document, plain: &'a str) -> Self {
        Self {
            doc,
            plain,
            keywords: doc.keywords(),
            paragraphs: text::paragraphs(&doc.content),
        }
    }
}

enum Outcome {
    Pass,
    Fail(String),
}

struct CheckRule {
    id: &'static str,
    label: &'static str,
    category: Category,
    weight: fn(&CheckWeights) -> u32,
    eval: fn(&CheckContext, &Rules) -> Outcome,
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h1(?:\s[^>]*)?>").unwrap());

static H2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h2(?:\s[^>]*)?>").unwrap());

static IMG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img\b").unwrap());

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<a(?:\s[^>]*)?>").unwrap());

// ---------------------------------------------------------------------------
// Shared predicates
// ---------------------------------------------------------------------------

pub(crate) fn has_h1(markup: &str) -> bool {
    H1_RE.is_match(markup)
}

pub(crate) fn has_h2(markup: &str) -> bool {
    H2_RE.is_match(markup)
}

pub(crate) fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Missing, short and long get different advice; all three fail.
fn length_outcome(field: &str, value: &str, range: Range) -> Outcome {
    let len = char_len(value);
    if len == 0 {
        Outcome::Fail(format!(
            "Add a {field} of {} to {} characters.",
            range.min, range.max
        ))
    } else if len < range.min {
        Outcome::Fail(format!(
            "The {field} is too short ({len} characters). Aim for {} to {}.",
            range.min, range.max
        ))
    } else if len > range.max {
        Outcome::Fail(format!(
            "The {field} is too long ({len} characters). Keep it between {} and {}.",
            range.min, range.max
        ))
    } else {
        Outcome::Pass
    }
}

/// Whole-word, case-insensitive occurrences of `keyword` in `text`.
fn keyword_occurrences(text: &str, keyword: &str) -> usize {
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))) {
        Ok(re) => re.find_iter(text).count(),
        Err(err) => {
            tracing::warn!(keyword, %err, "keyword pattern rejected, counting zero occurrences");
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Check implementations
// ---------------------------------------------------------------------------

fn check_word_count(ctx: &CheckContext, rules: &Rules) -> Outcome {
    let words = ctx.doc.word_count;
    if words >= rules.min_word_count {
        Outcome::Pass
    } else if words == 0 {
        Outcome::Fail(format!(
            "Add body content. Aim for at least {} words.",
            rules.min_word_count
        ))
    } else {
        Outcome::Fail(format!(
            "Content has {words} words. Expand it to at least {}.",
            rules.min_word_count
        ))
    }
}

fn check_headings(ctx: &CheckContext, _rules: &Rules) -> Outcome {
    match (has_h1(&ctx.doc.content), has_h2(&ctx.doc.content)) {
        (true, true) => Outcome::Pass,
        (false, true) => Outcome::Fail("Add an H1 heading for the main topic.".to_string()),
        (true, false) => {
            Outcome::Fail("Add H2 subheadings to break the content into sections.".to_string())
        }
        (false, false) => Outcome::Fail(
            "Add an H1 heading and H2 subheadings to structure the content.".to_string(),
        ),
    }
}

fn check_images(ctx: &CheckContext, _rules: &Rules) -> Outcome {
    if !ctx.doc.featured_image_url.is_empty() || IMG_RE.is_match(&ctx.doc.content) {
        Outcome::Pass
    } else {
        Outcome::Fail("Add a featured image or at least one image in the content.".to_string())
    }
}

fn check_links(ctx: &CheckContext, rules: &Rules) -> Outcome {
    let links = LINK_RE.find_iter(&ctx.doc.content).count();
    if links >= rules.min_links {
        Outcome::Pass
    } else {
        Outcome::Fail(format!(
            "Content has {links} link(s). Add at least {} internal or external links.",
            rules.min_links
        ))
    }
}

fn check_title_length(ctx: &CheckContext, rules: &Rules) -> Outcome {
    length_outcome("title", &ctx.doc.title, rules.title_length)
}

fn check_meta_description(ctx: &CheckContext, rules: &Rules) -> Outcome {
    length_outcome(
        "meta description",
        &ctx.doc.meta_description,
        rules.meta_description_length,
    )
}

fn check_slug(ctx: &CheckContext, _rules: &Rules) -> Outcome {
    if ctx.doc.slug.trim().is_empty() {
        Outcome::Fail("Set a URL slug for this content.".to_string())
    } else {
        Outcome::Pass
    }
}

fn check_meta_keywords(ctx: &CheckContext, rules: &Rules) -> Outcome {
    let count = ctx.keywords.len();
    if count >= rules.min_meta_keywords {
        Outcome::Pass
    } else if count == 0 {
        Outcome::Fail(format!(
            "Add at least {} focus keywords, separated by commas.",
            rules.min_meta_keywords
        ))
    } else {
        Outcome::Fail(format!(
            "Only {count} keyword(s) defined. Add at least {}.",
            rules.min_meta_keywords
        ))
    }
}

fn check_title_keyword(ctx: &CheckContext, _rules: &Rules) -> Outcome {
    if ctx.keywords.is_empty() {
        return Outcome::Pass;
    }
    let title = ctx.doc.title.to_lowercase();
    if ctx
        .keywords
        .iter()
        .any(|k| title.contains(&k.to_lowercase()))
    {
        Outcome::Pass
    } else {
        Outcome::Fail(format!(
            "Include a focus keyword such as '{}' in the title.",
            ctx.keywords[0]
        ))
    }
}

fn check_content_keyword(ctx: &CheckContext, rules: &Rules) -> Outcome {
    // Only the first usable keyword is the primary one.
    let Some(primary) = ctx
        .keywords
        .iter()
        .find(|k| k.chars().count() > rules.min_primary_keyword_len)
    else {
        return Outcome::Pass;
    };
    let range = rules.content_keyword_occurrences;
    let count = keyword_occurrences(ctx.plain, primary);
    if range.contains(count) {
        Outcome::Pass
    } else if count < range.min {
        Outcome::Fail(format!(
            "'{primary}' appears {count} time(s) in the content. Use it at least {} times.",
            range.min
        ))
    } else {
        Outcome::Fail(format!(
            "'{primary}' appears {count} times in the content. Keep it to {} or fewer to avoid keyword stuffing.",
            range.max
        ))
    }
}

fn check_paragraph_length(ctx: &CheckContext, rules: &Rules) -> Outcome {
    if ctx.paragraphs.is_empty() {
        return Outcome::Fail("Add body content split into short paragraphs.".to_string());
    }
    let words: usize = ctx.paragraphs.iter().map(|p| text::word_count(p)).sum();
    let average = words as f64 / ctx.paragraphs.len() as f64;
    if average <= rules.max_avg_paragraph_words {
        Outcome::Pass
    } else {
        Outcome::Fail(format!(
            "Paragraphs average {average:.0} words. Break them up to {:.0} words or fewer.",
            rules.max_avg_paragraph_words
        ))
    }
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

static CHECKS: [CheckRule; 11] = [
    CheckRule {
        id: "word-count",
        label: "Content length",
        category: Category::Content,
        weight: |w| w.word_count,
        eval: check_word_count,
    },
    CheckRule {
        id: "headings",
        label: "Heading structure (H1 and H2)",
        category: Category::Structure,
        weight: |w| w.headings,
        eval: check_headings,
    },
    CheckRule {
        id: "images",
        label: "Images",
        category: Category::Content,
        weight: |w| w.images,
        eval: check_images,
    },
    CheckRule {
        id: "links",
        label: "Links",
        category: Category::Structure,
        weight: |w| w.links,
        eval: check_links,
    },
    CheckRule {
        id: "title-length",
        label: "Title length",
        category: Category::Metadata,
        weight: |w| w.title_length,
        eval: check_title_length,
    },
    CheckRule {
        id: "meta-description",
        label: "Meta description length",
        category: Category::Metadata,
        weight: |w| w.meta_description,
        eval: check_meta_description,
    },
    CheckRule {
        id: "slug",
        label: "URL slug",
        category: Category::Metadata,
        weight: |w| w.slug,
        eval: check_slug,
    },
    CheckRule {
        id: "meta-keywords",
        label: "Focus keywords",
        category: Category::Metadata,
        weight: |w| w.meta_keywords,
        eval: check_meta_keywords,
    },
    CheckRule {
        id: "title-keyword",
        label: "Keyword in title",
        category: Category::Metadata,
        weight: |w| w.title_keyword,
        eval: check_title_keyword,
    },
    CheckRule {
        id: "content-keyword",
        label: "Keyword usage in content",
        category: Category::Content,
        weight: |w| w.content_keyword,
        eval: check_content_keyword,
    },
    CheckRule {
        id: "paragraph-length",
        label: "Paragraph length",
        category: Category::Readability,
        weight: |w| w.paragraph_length,
        eval: check_paragraph_length,
    },
];

/// Ids of the checklist, in evaluation order.
pub fn check_ids() -> impl Iterator<Item = &'static str> {
    CHECKS.iter().map(|c| c.id)
}

/// Run every check in fixed order.
pub fn evaluate(ctx: &CheckContext, rules: &Rules) -> Vec<CheckItem> {
    CHECKS
        .iter()
        .map(|check| {
            let (passed, suggestion) = match (check.eval)(ctx, rules) {
                Outcome::Pass => (true, None),
                Outcome::Fail(suggestion) => {
                    tracing::debug!(check = check.id, %suggestion, "check failed");
                    (false, Some(suggestion))
                }
            };
            CheckItem {
                id: check.id.to_string(),
                label: check.label.to_string(),
                passed,
                weight: (check.weight)(&rules.weights),
                category: check.category,
                suggestion,
            }
        })
        .collect()
}
