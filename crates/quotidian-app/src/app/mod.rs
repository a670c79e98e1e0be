//! Frontend-facing controller
//!
//! `QuoteController` owns all widget state; frontends send `AppCommand`s
//! and render the `AppSnapshot` it exposes.

pub mod clipboard;
pub mod controller;
pub mod state;

pub use clipboard::ClipboardSink;
pub use controller::{ControllerOptions, QuoteController};
pub use state::{AppCommand, AppSnapshot, DisplayedQuote, Notice, NoticeKind};
