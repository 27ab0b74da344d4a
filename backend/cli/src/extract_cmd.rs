//! `textlift extract`: the select, submit, copy flow without a screen.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use textlift_core::{ClipboardSink, ExtractedText, OcrResponse, SelectionSource, Workbench};
use textlift_media::{load_file, AcceptFilter};
use tracing::{info, warn};

use crate::terminal_output::{note_info, note_warn};

pub struct ExtractOptions {
    pub copy: bool,
    pub json: bool,
}

pub async fn run(
    workbench: &Workbench,
    clipboard: Arc<dyn ClipboardSink>,
    filter: &AcceptFilter,
    path: &Path,
    opts: ExtractOptions,
) -> Result<()> {
    if !filter.accepts(path) {
        note_warn(&format!("{} is not an accepted format, sending it anyway", path.display()));
    }

    let text = extract(workbench, path, opts.copy).await?;
    println!("{}", render(&text, opts.json)?);
    if opts.copy && !text.is_empty() && hand_off(clipboard).await {
        note_info("Copied to clipboard");
    }
    Ok(())
}

/// Keep the copied text around after exit. `false` means it never reached a
/// clipboard outside this process.
pub async fn hand_off(clipboard: Arc<dyn ClipboardSink>) -> bool {
    match tokio::task::spawn_blocking(move || clipboard.persist()).await {
        Ok(Ok(true)) => true,
        Ok(Ok(false)) => {
            note_warn("No system clipboard available, the text was not copied");
            false
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Clipboard hand-off failed");
            note_warn(&format!("Clipboard copy did not stick: {e:#}"));
            false
        }
        Err(e) => {
            warn!(error = %e, "Clipboard hand-off task failed");
            false
        }
    }
}

/// Behaves like a drop of `path` followed by a submit. Failures surface as
/// the user-facing message; details are in the log.
pub async fn extract(workbench: &Workbench, path: &Path, copy: bool) -> Result<ExtractedText> {
    let file = load_file(path).await?;
    workbench.select_file(SelectionSource::Drop(vec![file]));

    let text = match workbench.submit().await {
        Ok(text) => text,
        Err(user_error) => bail!("{user_error}"),
    };
    info!(fragments = text.tokens().len(), "Extraction finished");

    if copy {
        workbench.copy();
    }
    Ok(text)
}

pub fn render(text: &ExtractedText, json: bool) -> Result<String> {
    if json {
        let response = OcrResponse { text: text.clone() };
        Ok(serde_json::to_string_pretty(&response)?)
    } else {
        Ok(text.joined())
    }
}
