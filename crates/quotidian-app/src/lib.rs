//! Quotidian App Services
//!
//! Favourites persistence, settings, and the quote controller shared by
//! frontends. Depends on the `quotidian` engine crate.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
