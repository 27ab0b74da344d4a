use async_trait::async_trait;

use crate::error::OcrError;
use crate::types::{ExtractedText, SelectedFile};

/// Remote text recognition service.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Human-readable name of this backend, used in logs.
    fn name(&self) -> &str;

    /// Upload one file and return the recognised fragments in order.
    async fn recognize(&self, file: &SelectedFile) -> Result<ExtractedText, OcrError>;
}

/// Write-only text clipboard.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;

    /// Make the last write outlive this process. May block. Returns `false`
    /// when the text never left the process.
    fn persist(&self) -> anyhow::Result<bool> {
        Ok(false)
    }
}
