//! Shared HTTP client wrapper
//!
//! Thin wrapper around `reqwest::blocking::Client` that centralizes
//! USER_AGENT and timeout configuration.

use crate::config::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;
use std::time::Duration;

/// Status and body of a completed GET
#[derive(Debug, Clone)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

/// Shared HTTP client with standard configuration
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a new client with default timeouts
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with a custom whole-request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let connect = timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS));
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect)
            .timeout(timeout)
            .build()?;
        Ok(Self { inner })
    }

    /// GET a URL and return its status and body without judging either
    pub fn get_text(&self, url: &str) -> Result<TextResponse> {
        let resp = self
            .inner
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(TextResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_short_timeout() {
        let client = HttpClient::with_timeout(Duration::from_millis(500));
        assert!(client.is_ok());
    }

    #[test]
    fn test_get_text_invalid_url() {
        let client = HttpClient::new().unwrap();
        let result = client.get_text("not a url");
        assert!(matches!(result, Err(QuoteError::Network(_))));
    }
}
