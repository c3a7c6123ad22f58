//! Markup stripping and word-level helpers shared by the metrics and the checklist.
//!
//! Markup is handled with patterns, not a parser. Content is expected to come from
//! our own editor, so unbalanced or odd tags only degrade extraction quality.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::Rules;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-6]\b[^>]*>.*?</h[1-6]\s*>").unwrap());

static BLOCK_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|div|li|blockquote|pre|section|article|td|tr)\s*>").unwrap()
});

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r\f]*\n").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static PUNCT_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static SILENT_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[^aeiouy]es|ed|[^aeiouy]e)$").unwrap());

static LEADING_Y_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^y").unwrap());

static VOWEL_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiouy]+").unwrap());

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, &(entity, plain)| acc.replace(entity, plain))
}

fn strip_tags(markup: &str) -> String {
    let without_code = SCRIPT_STYLE_RE.replace_all(markup, " ");
    decode_entities(&TAG_RE.replace_all(&without_code, " "))
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Plain text of `markup`: script/style blocks dropped, tags stripped, whitespace collapsed.
pub fn normalize(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    collapse_whitespace(&strip_tags(markup))
}

/// Plain-text body paragraphs of `markup`. Closing body-block tags and blank lines end a
/// paragraph; headings are not paragraphs and their text is dropped.
pub fn paragraphs(markup: &str) -> Vec<String> {
    let without_code = SCRIPT_STYLE_RE.replace_all(markup, " ");
    let without_headings = HEADING_RE.replace_all(&without_code, "\n\n");
    let broken = BLOCK_BREAK_RE.replace_all(&without_headings, "\n\n");
    let plain = decode_entities(&TAG_RE.replace_all(&broken, " "));
    BLANK_LINE_RE
        .split(&plain)
        .map(collapse_whitespace)
        .filter(|p| !p.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Lexical analysis
// ---------------------------------------------------------------------------

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lower-cased whitespace tokens with surrounding punctuation removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            let token = PUNCT_STRIP_RE.replace_all(raw, "").to_lowercase();
            if token.is_empty() {
                None
            } else {
                Some(token)
            }
        })
        .collect()
}

/// Tokens that carry topical weight: longer than the minimum and not stop words.
pub fn content_tokens(text: &str, rules: &Rules) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.chars().count() > rules.min_token_len && !rules.is_stop_word(t))
        .collect()
}

pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Heuristic English syllable count, always at least 1. Approximate by nature.
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.len() <= 3 {
        return 1;
    }
    let stem = SILENT_SUFFIX_RE.replace(&letters, "");
    let stem = LEADING_Y_RE.replace(&stem, "");
    VOWEL_RUN_RE.find_iter(&stem).count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_tags_and_collapses_whitespace() {
        let html = "<h1>Hello</h1>\n\n<p>  big   <b>world</b> </p>";
        assert_eq!(normalize(html), "Hello big world");
    }

    #[test]
    fn normalize_drops_script_and_style_bodies() {
        let html = "<p>keep</p><script type=\"x\">var drop = 1;</script><STYLE>p{}</STYLE><p>this</p>";
        assert_eq!(normalize(html), "keep this");
    }

    #[test]
    fn normalize_handles_empty_and_unbalanced_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("<p>open <b>bold"), "open bold");
        assert_eq!(normalize("a < b"), "a < b");
    }

    #[test]
    fn normalize_decodes_common_entities() {
        assert_eq!(normalize("Fish&nbsp;&amp;&nbsp;chips"), "Fish & chips");
    }

    #[test]
    fn paragraphs_split_on_body_blocks_and_blank_lines() {
        let html = "<h2>Intro</h2><p>One two three.</p><p>Four five.</p>plain\n\nlast line";
        assert_eq!(
            paragraphs(html),
            vec!["One two three.", "Four five.", "plain", "last line"]
        );
    }

    #[test]
    fn paragraphs_skip_headings_and_line_breaks() {
        let html = "<h1>Title</h1><H2 id=\"a\">Part\none</H2><p>first<br>still first<hr>same</p>";
        assert_eq!(paragraphs(html), vec!["first still first same"]);
    }

    #[test]
    fn paragraphs_of_empty_markup_is_empty() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("<p> </p><br/>").is_empty());
    }

    #[test]
    fn tokenize_lowercases_and_trims_punctuation() {
        assert_eq!(
            tokenize("Shoes, RUNNING! (fitness) -- it's"),
            vec!["shoes", "running", "fitness", "it's"]
        );
    }

    #[test]
    fn content_tokens_drop_short_and_stop_words() {
        let rules = Rules::default();
        assert_eq!(
            content_tokens("The cat and an ox ran over the running track", &rules),
            vec!["cat", "ran", "running", "track"]
        );
    }

    #[test]
    fn sentences_split_on_terminator_runs() {
        assert_eq!(sentences("One. Two?! Three... "), vec!["One", "Two", "Three"]);
        assert_eq!(sentences("no terminator"), vec!["no terminator"]);
        assert!(sentences("...!?").is_empty());
    }

    #[test]
    fn syllable_heuristic() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("running"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("created"), 1);
        assert_eq!(count_syllables("yellow"), 2);
        assert_eq!(count_syllables("Rhythm!"), 1);
    }

    #[test]
    fn syllables_never_zero() {
        assert_eq!(count_syllables(""), 1);
        assert_eq!(count_syllables("12345"), 1);
        assert_eq!(count_syllables("bcdfg"), 1);
    }
}
