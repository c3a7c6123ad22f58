use serde::{Deserialize, Serialize};

/// A piece of content to score. `word_count` is supplied by the caller and trusted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    /// Block-level markup (headings, paragraphs, links, images).
    pub content: String,
    pub excerpt: Option<String>,
    pub meta_title: String,
    pub meta_description: String,
    /// Comma-separated.
    pub meta_keywords: String,
    pub slug: String,
    pub featured_image_url: String,
    pub word_count: u64,
}

impl Document {
    /// Trimmed, non-empty entries of `meta_keywords`, in listed order.
    pub fn keywords(&self) -> Vec<&str> {
        self.meta_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}
