//! Quotidian quote fetching engine
//!
//! Remote quote source, retry sequencing with offline fallbacks, and the
//! decorative theme palette.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use quotidian::fetch::{FetchEvent, FetchTask, RetryPolicy};
//! use quotidian::source::DummyJsonSource;
//!
//! let source = Arc::new(DummyJsonSource::new()?);
//! let (tx, rx) = crossbeam_channel::unbounded();
//! let _handle = FetchTask::new(source, RetryPolicy::default()).spawn(tx)?;
//! while let Ok(update) = rx.recv() {
//!     if let FetchEvent::Finished(fetched) = update.event {
//!         println!("{}", fetched.quote);
//!         break;
//!     }
//! }
//! # Ok::<(), quotidian::error::QuoteError>(())
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod quote;
pub mod source;
pub mod theme;
