//! Application settings management
//!
//! User preferences for the quote source and retry behaviour.

use crate::data::storage;
use crate::error::Result;
use quotidian::config::network::{DEFAULT_API_URL, REQUEST_TIMEOUT_SECS};
use quotidian::config::retry::{MAX_RETRIES, RETRY_DELAY_SECS};
use quotidian::fetch::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings file format version for migrations
const SETTINGS_VERSION: u32 = 1;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format version
    #[serde(default = "default_version")]
    pub version: u32,

    // === Source ===
    /// Random-quote endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    // === Retry ===
    /// Retries after the first failed request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    // === Startup ===
    /// Fetch a quote as soon as the widget opens
    #[serde(default = "default_true")]
    pub fetch_on_start: bool,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    MAX_RETRIES
}

fn default_retry_delay() -> u64 {
    RETRY_DELAY_SECS
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            fetch_on_start: true,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        match storage::load_from::<Settings>(path)? {
            Some(settings) => Ok(settings),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save_to(path, self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Retry policy described by these settings
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_retry_delay(Duration::from_secs(self.retry_delay_secs))
            .with_request_timeout(self.request_timeout())
    }
}
