//! Quote model
//!
//! The quote value type, where a quote came from, and the bundled catalog
//! of offline fallbacks and category labels.

pub mod catalog;
pub mod types;

// Re-export commonly used types
pub use catalog::{is_fallback, random_category, random_fallback, CATEGORIES, FALLBACK_QUOTES};
pub use types::{FallbackReason, FetchedQuote, Quote, QuoteOrigin, UNKNOWN_AUTHOR};
