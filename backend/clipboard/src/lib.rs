//! Clipboard sinks.
//!
//! [`SystemClipboard`] talks to the desktop clipboard through `arboard`;
//! [`MemoryClipboard`] keeps writes in memory for headless runs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use textlift_core::ClipboardSink;

/// How long [`SystemClipboard::persist`] keeps serving the selection on X11
/// and Wayland, waiting for a clipboard manager to take it over.
pub const HAND_OFF_WINDOW: Duration = Duration::from_secs(10);

struct Owned {
    clipboard: arboard::Clipboard,
    last: Option<String>,
}

/// The desktop clipboard.
///
/// The handle is kept for the life of the process: on X11 the copied text
/// disappears once its owner is dropped.
pub struct SystemClipboard {
    inner: Mutex<Owned>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new().context("Failed to open the system clipboard")?;
        info!("System clipboard ready");
        Ok(Self {
            inner: Mutex::new(Owned { clipboard, last: None }),
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut owned = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard handle poisoned"))?;
        owned
            .clipboard
            .set_text(text.to_owned())
            .context("Failed to write text to the clipboard")?;
        owned.last = Some(text.to_owned());
        debug!(chars = text.chars().count(), "Text written to clipboard");
        Ok(())
    }

    /// Reads the text back, then on Linux re-sets it and blocks until another
    /// owner takes the selection or [`HAND_OFF_WINDOW`] passes.
    fn persist(&self) -> Result<bool> {
        let mut owned = self
            .inner
            .lock()
            .map_err(|_| anyhow!("clipboard handle poisoned"))?;
        let Some(text) = owned.last.clone() else {
            return Ok(false);
        };
        let current = owned
            .clipboard
            .get_text()
            .context("Failed to read the clipboard back")?;
        if current != text {
            debug!("Clipboard was overwritten after the copy");
            return Ok(false);
        }
        hand_off(&mut owned.clipboard, text)?;
        Ok(true)
    }
}

#[cfg(target_os = "linux")]
fn hand_off(clipboard: &mut arboard::Clipboard, text: String) -> Result<()> {
    use arboard::SetExtLinux;

    debug!(window_secs = HAND_OFF_WINDOW.as_secs(), "Serving clipboard until another owner takes it");
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + HAND_OFF_WINDOW)
        .text(text)
        .context("Failed to hand the clipboard over")
}

// Other platforms copy the text into the OS clipboard on set.
#[cfg(not(target_os = "linux"))]
fn hand_off(_clipboard: &mut arboard::Clipboard, _text: String) -> Result<()> {
    Ok(())
}

/// Records every write. Used when no desktop clipboard is available.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write, if any.
    pub fn contents(&self) -> Option<String> {
        self.writes.lock().ok().and_then(|w| w.last().cloned())
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.writes
            .lock()
            .map_err(|_| anyhow!("memory clipboard poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}

/// Open the system clipboard, falling back to memory when there is no
/// display to talk to.
pub fn system_or_memory() -> Arc<dyn ClipboardSink> {
    match SystemClipboard::new() {
        Ok(clipboard) => Arc::new(clipboard),
        Err(e) => {
            tracing::warn!(error = %e, "System clipboard unavailable; copies stay in memory");
            Arc::new(MemoryClipboard::new())
        }
    }
}
