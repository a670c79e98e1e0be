//! Persisted record types

use chrono::{DateTime, Utc};
use quotidian::quote::{Quote, UNKNOWN_AUTHOR};
use serde::{Deserialize, Deserializer, Serialize};

/// A saved quote
///
/// Identity is the `(text, author)` pair. Field names on disk follow the
/// browser storage format: `quote`, `author`, `savedAt`. Only `quote` is
/// required; a missing or null `author` reads as "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteRecord {
    #[serde(rename = "quote")]
    pub text: String,
    #[serde(default = "unknown_author", deserialize_with = "author_or_unknown")]
    pub author: String,
    #[serde(rename = "savedAt", default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

fn author_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let author = Option::<String>::deserialize(deserializer)?;
    Ok(author.unwrap_or_else(unknown_author))
}

impl FavouriteRecord {
    pub fn new(text: impl Into<String>, author: impl Into<String>, saved_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            saved_at: Some(saved_at),
        }
    }

    /// Whether this record has the identity `(text, author)`
    pub fn matches(&self, text: &str, author: &str) -> bool {
        self.text == text && self.author == author
    }

    pub fn quote(&self) -> Quote {
        Quote::new(&self.text, &self.author)
    }

    /// Drawer label, e.g. "Saved Mar 4, 2025"; None for undated records
    pub fn saved_label(&self) -> Option<String> {
        self.saved_at
            .map(|at| format!("Saved {}", at.format("%b %-d, %Y")))
    }
}
