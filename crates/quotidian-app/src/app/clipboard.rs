//! Clipboard seam

use crate::error::Result;

/// Somewhere copied text goes
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}
