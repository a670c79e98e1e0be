//! Quote value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author shown when the source omits one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote and its author
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Build a quote from a possibly missing or blank author
    pub fn with_optional_author(text: impl Into<String>, author: Option<&str>) -> Self {
        let author = match author.map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => UNKNOWN_AUTHOR.to_string(),
        };
        Self::new(text, author)
    }

    /// Clipboard form: `"text" — author`
    pub fn to_clipboard_text(&self) -> String {
        format!("\"{}\" \u{2014} {}", self.text, self.author)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" \u{2014} {}", self.text, self.author)
    }
}

/// Why a fallback quote was used instead of a remote one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Every attempt failed
    Exhausted,
    /// The user dismissed the retry notice
    Dismissed,
}

/// Where a displayed quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOrigin {
    Remote,
    Fallback(FallbackReason),
}

impl QuoteOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, QuoteOrigin::Fallback(_))
    }
}

/// Final result of a fetch sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedQuote {
    pub quote: Quote,
    pub origin: QuoteOrigin,
}

impl FetchedQuote {
    pub fn remote(quote: Quote) -> Self {
        Self {
            quote,
            origin: QuoteOrigin::Remote,
        }
    }

    pub fn fallback(quote: Quote, reason: FallbackReason) -> Self {
        Self {
            quote,
            origin: QuoteOrigin::Fallback(reason),
        }
    }
}
