//! Retry policy

use std::time::Duration;

use crate::config::network::REQUEST_TIMEOUT_SECS;
use crate::config::retry::{COUNTDOWN_TICK_MS, MAX_RETRIES, RETRY_DELAY_SECS};

/// Timing and bounds of a fetch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failure
    pub max_retries: u32,
    /// Wait between a failure and the next attempt
    pub retry_delay: Duration,
    /// Per-request deadline
    pub request_timeout: Duration,
    /// Countdown granularity while waiting
    pub countdown_tick: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            countdown_tick: Duration::from_millis(COUNTDOWN_TICK_MS),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick;
        self
    }

    /// Total number of requests a fully failing sequence makes
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}
