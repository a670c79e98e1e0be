//! Favourites store
//!
//! A most-recent-first list of saved quotes, persisted as one JSON array in
//! a key-value slot. Every operation reads (and, for mutations, rewrites)
//! the whole slot, so several handles on the same slot never diverge.

use chrono::Utc;
use tracing::{debug, warn};

use crate::data::slot::KvSlot;
use crate::data::types::FavouriteRecord;
use crate::error::{AppError, Result};

pub struct FavouritesStore<S: KvSlot> {
    slot: S,
}

impl<S: KvSlot> FavouritesStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// All favourites, most recent first
    ///
    /// An unreadable or corrupt slot reads as empty. Inside a well-formed
    /// array each record parses on its own, so one bad entry only drops
    /// that entry.
    pub fn list(&self) -> Vec<FavouriteRecord> {
        let bytes = match self.slot.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "favourites unreadable, treating as empty");
                return Vec::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        let entries = match serde_json::from_slice::<Option<Vec<serde_json::Value>>>(&bytes) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "favourites corrupt, treating as empty");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<FavouriteRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed favourite");
                    None
                }
            })
            .collect()
    }

    pub fn contains(&self, text: &str, author: &str) -> bool {
        self.list().iter().any(|f| f.matches(text, author))
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Save a quote at the front of the list
    ///
    /// Returns false (and writes nothing) if the pair is already saved.
    pub fn add(&mut self, text: &str, author: &str) -> Result<bool> {
        let mut favourites = self.list();
        if favourites.iter().any(|f| f.matches(text, author)) {
            return Ok(false);
        }

        favourites.insert(0, FavouriteRecord::new(text, author, Utc::now()));
        self.persist(&favourites)?;
        debug!(count = favourites.len(), "favourite added");
        Ok(true)
    }

    /// Remove a saved quote
    ///
    /// Returns false (and writes nothing) if the pair was not saved.
    pub fn remove(&mut self, text: &str, author: &str) -> Result<bool> {
        let mut favourites = self.list();
        let before = favourites.len();
        favourites.retain(|f| !f.matches(text, author));
        if favourites.len() == before {
            return Ok(false);
        }

        self.persist(&favourites)?;
        debug!(count = favourites.len(), "favourite removed");
        Ok(true)
    }

    /// Remove everything
    pub fn clear(&mut self) -> Result<()> {
        self.persist(&[])?;
        debug!("favourites cleared");
        Ok(())
    }

    /// Save the pair if absent, remove it if present
    ///
    /// Returns whether the pair is saved afterwards.
    pub fn toggle(&mut self, text: &str, author: &str) -> Result<bool> {
        if self.contains(text, author) {
            self.remove(text, author)?;
            Ok(false)
        } else {
            self.add(text, author)?;
            Ok(true)
        }
    }

    fn persist(&mut self, favourites: &[FavouriteRecord]) -> Result<()> {
        let bytes = serde_json::to_vec(favourites)
            .map_err(|e| AppError::Storage(format!("Failed to serialize favourites: {}", e)))?;
        self.slot.write(&bytes)
    }
}
