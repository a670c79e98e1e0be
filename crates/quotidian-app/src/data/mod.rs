//! Data persistence
//!
//! Handles favourites, settings, and the key-value slots behind them.

pub mod favourites;
pub mod settings;
pub mod slot;
pub mod storage;
pub mod types;

// Re-export common types
pub use favourites::FavouritesStore;
pub use settings::Settings;
pub use slot::{FileSlot, KvSlot, MemorySlot};
pub use storage::config_dir;
pub use types::FavouriteRecord;
