//! System clipboard with a terminal fallback

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, warn};

use quotidian_app::app::ClipboardSink;
use quotidian_app::error::{AppError, Result};

/// Clipboard backed by `arboard`, falling back to OSC 52
///
/// The `arboard` handle is kept for the whole session; on X11 the copied
/// text only lives as long as it does.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                debug!(error = %e, "system clipboard unavailable, using OSC 52");
                None
            }
        };
        Self { inner }
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(clipboard) = self.inner.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "system clipboard write failed, using OSC 52"),
            }
        }

        let mut out = io::stdout().lock();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| AppError::Clipboard(format!("Terminal clipboard write failed: {}", e)))
    }
}

/// Terminal escape that asks the emulator to set its clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
