//! Configuration constants for the quotidian engine

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("Quotidian/", env!("CARGO_PKG_VERSION"));

    /// Default random-quote endpoint
    pub const DEFAULT_API_URL: &str = "https://dummyjson.com/quotes/random";

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 4;

    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 6;
}

/// Retry sequencing configuration
pub mod retry {
    /// Retries after the first failed request (four requests in total)
    pub const MAX_RETRIES: u32 = 3;

    /// Fixed delay between a failure and the next attempt, in seconds
    pub const RETRY_DELAY_SECS: u64 = 2;

    /// Countdown granularity while waiting for a retry, in milliseconds
    pub const COUNTDOWN_TICK_MS: u64 = 1000;
}
