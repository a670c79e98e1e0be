//! DummyJSON quote source
//!
//! Implementation of `QuoteSource` for the DummyJSON random-quote endpoint
//! (<https://dummyjson.com/docs/quotes>).

use serde::Deserialize;
use std::time::Duration;

use crate::config::network::DEFAULT_API_URL;
use crate::error::{QuoteError, Result};
use crate::quote::Quote;

use super::client::HttpClient;
use super::QuoteSource;

// =============================================================================
// Internal API response type (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
struct DjQuote {
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

/// Turn a raw response into a quote
///
/// Any non-2xx status, a non-JSON body, or a missing/blank `quote` field
/// is a failure.
pub fn parse_response(status: u16, body: &str) -> Result<Quote> {
    if !(200..300).contains(&status) {
        return Err(QuoteError::Status(status));
    }

    let dj: DjQuote =
        serde_json::from_str(body).map_err(|e| QuoteError::Decode(e.to_string()))?;

    match dj.quote {
        Some(text) if !text.trim().is_empty() => {
            Ok(Quote::with_optional_author(text, dj.author.as_deref()))
        }
        _ => Err(QuoteError::EmptyQuote),
    }
}

// =============================================================================
// DummyJsonSource
// =============================================================================

/// Random quotes from DummyJSON (or any endpoint with the same shape)
pub struct DummyJsonSource {
    client: HttpClient,
    url: String,
}

impl DummyJsonSource {
    /// Source against the default endpoint
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Source against a custom endpoint and request timeout
    pub fn with_endpoint(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_timeout(timeout)?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteSource for DummyJsonSource {
    fn name(&self) -> &'static str {
        "DummyJSON"
    }

    fn fetch(&self) -> Result<Quote> {
        let resp = self.client.get_text(&self.url)?;
        parse_response(resp.status, &resp.body)
    }
}
