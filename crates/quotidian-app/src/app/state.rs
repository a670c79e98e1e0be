//! Shared application state and commands
//!
//! `AppCommand` is the unified command type sent by any frontend.
//! `AppSnapshot` is the state frontends render.

use std::time::{Duration, Instant};

use quotidian::quote::{Quote, QuoteOrigin};

use crate::data::types::FavouriteRecord;

/// Commands sent by any frontend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    // Quote
    NewQuote,
    Copy,
    DismissNotice,

    // Favourites
    ToggleFavourite,
    OpenFavourites,
    CloseFavourites,
    RemoveFavourite(usize),
    CopyFavourite(usize),
    ClearFavourites,

    // Shutdown the app
    Shutdown,
}

/// What a notice is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// Waiting to retry after a failed attempt
    Retrying {
        attempt: u32,
        max_retries: u32,
        remaining_secs: u64,
        delay: Duration,
    },
    /// Showing a fallback after every attempt failed
    Offline,
    /// A non-fatal failure (storage, clipboard)
    Error,
}

/// A transient toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub detail: String,
    pub shown_at: Instant,
    /// Auto-dismiss after this long; `None` stays until replaced
    pub lifetime: Option<Duration>,
}

impl Notice {
    pub fn retrying(attempt: u32, max_retries: u32, delay: Duration, now: Instant) -> Self {
        let remaining_secs = delay.as_secs();
        Self {
            kind: NoticeKind::Retrying {
                attempt,
                max_retries,
                remaining_secs,
                delay,
            },
            message: format!("Couldn't reach the server. (Attempt {attempt}/{max_retries})"),
            detail: countdown_detail(remaining_secs),
            shown_at: now,
            lifetime: None,
        }
    }

    pub fn offline(now: Instant, lifetime: Duration) -> Self {
        Self {
            kind: NoticeKind::Offline,
            message: "No internet connection.".to_string(),
            detail: "Showing a saved quote instead.".to_string(),
            shown_at: now,
            lifetime: Some(lifetime),
        }
    }

    pub fn error(message: impl Into<String>, detail: impl Into<String>, now: Instant, lifetime: Duration) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            detail: detail.into(),
            shown_at: now,
            lifetime: Some(lifetime),
        }
    }

    pub fn is_retrying(&self) -> bool {
        matches!(self.kind, NoticeKind::Retrying { .. })
    }

    /// Update the retry countdown; ignored for other attempts or kinds
    pub fn set_countdown(&mut self, for_attempt: u32, secs: u64) {
        if let NoticeKind::Retrying { attempt, remaining_secs, .. } = &mut self.kind {
            if *attempt == for_attempt {
                *remaining_secs = secs;
                self.detail = countdown_detail(secs);
            }
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.lifetime
            .is_some_and(|lifetime| now.saturating_duration_since(self.shown_at) >= lifetime)
    }

    /// Fraction of the notice's countdown that has elapsed (0.0–1.0)
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let span = match (&self.kind, self.lifetime) {
            (NoticeKind::Retrying { delay, .. }, _) => *delay,
            (_, Some(lifetime)) => lifetime,
            _ => return None,
        };
        if span.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(self.shown_at);
        Some((elapsed.as_secs_f64() / span.as_secs_f64()).min(1.0))
    }
}

fn countdown_detail(secs: u64) -> String {
    format!("Retrying in {secs}s\u{2026}")
}

/// The quote on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedQuote {
    pub quote: Quote,
    pub origin: QuoteOrigin,
    pub category: &'static str,
}

/// Snapshot of widget state
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    pub current: Option<DisplayedQuote>,
    /// True from a new-quote request until its quote is on screen
    pub is_fetching: bool,
    /// True while the outgoing quote fades out
    pub is_fading: bool,
    /// Loading overlay text while fetching
    pub loading_text: Option<String>,
    pub notice: Option<Notice>,

    /// Current quote is a favourite
    pub is_saved: bool,
    pub favourite_count: usize,
    pub drawer_open: bool,
    /// Drawer contents, refreshed while the drawer is open
    pub favourites: Vec<FavouriteRecord>,

    pub theme_index: usize,

    /// Copy confirmation for the current quote
    pub copied: bool,
    /// Copy confirmation for a drawer entry
    pub copied_favourite: Option<usize>,
}

impl AppSnapshot {
    /// Text for the copy button
    pub fn copy_label(&self) -> &'static str {
        if self.copied {
            "\u{2713} Copied!"
        } else {
            "Copy Quote"
        }
    }

    /// Text for the new-quote button
    pub fn new_quote_label(&self) -> &'static str {
        if self.is_fetching {
            "Loading\u{2026}"
        } else {
            "New Quote"
        }
    }
}
