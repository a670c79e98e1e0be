//! Configuration constants for quotidian app services

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "quotidian";
}

/// Persistence-related configuration
pub mod data {
    /// Key-value slot holding the favourites list
    pub const FAVOURITES_FILE: &str = "quotidian_favourites.json";

    /// User settings file
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Log file used while the full-screen widget owns the terminal
    pub const LOG_FILE: &str = "quotidian.log";
}

/// Presentation timings
pub mod display {
    /// Fade-out of the outgoing quote before the new one lands
    pub const FADE_MS: u64 = 400;

    /// How long the offline notice stays up
    pub const OFFLINE_NOTICE_SECS: u64 = 5;

    /// How long the "copied" confirmation stays up
    pub const COPY_FEEDBACK_MS: u64 = 2200;
}
