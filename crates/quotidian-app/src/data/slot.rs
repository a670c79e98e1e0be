//! Key-value slots
//!
//! A slot holds one opaque value, read and written wholesale. Stores are
//! generic over the slot so they can run against a file in production and
//! an in-memory fake in tests.

use std::path::{Path, PathBuf};

use crate::data::storage;
use crate::error::Result;

/// A single persisted value
pub trait KvSlot {
    /// Current contents, or `None` if nothing has been written yet
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the contents
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Slot backed by a file
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KvSlot for FileSlot {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        storage::read_bytes(&self.path)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        storage::write_bytes(&self.path, bytes)
    }
}

/// Slot held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    bytes: Option<Vec<u8>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `bytes`
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }
}

impl KvSlot for MemorySlot {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}
