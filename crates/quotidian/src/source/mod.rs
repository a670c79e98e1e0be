//! Quote sources
//!
//! Defines the interface remote quote services implement, plus the shared
//! HTTP client and the DummyJSON implementation.

pub mod client;
pub mod dummyjson;

pub use client::HttpClient;
pub use dummyjson::DummyJsonSource;

use crate::error::Result;
use crate::quote::Quote;

/// A service that hands out one random quote per request
///
/// `fetch` performs a single attempt. Retries, timeouts and fallbacks are
/// handled by [`crate::fetch::FetchTask`].
pub trait QuoteSource: Send + Sync {
    /// Display name for the source (e.g., "DummyJSON")
    fn name(&self) -> &'static str;

    /// Request one quote
    fn fetch(&self) -> Result<Quote>;
}
