use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use textlift_core::{SelectedFile, SelectionSource};

use crate::mime_detect::detect_mime_type;

/// Read a file from disk into memory with its name and MIME hint.
pub async fn load_file(path: &Path) -> Result<SelectedFile> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = detect_mime_type(path);
    debug!(path = %path.display(), mime, bytes = data.len(), "Loaded file");
    Ok(SelectedFile::new(name, mime, Bytes::from(data)))
}

/// Turn the paths of a picker or drop event into a selection.
///
/// Only the first path is read, since only the first file is ever kept.
/// `wrap` is the event kind, e.g. `SelectionSource::Drop`.
pub async fn load_selection(
    paths: &[PathBuf],
    wrap: fn(Vec<SelectedFile>) -> SelectionSource,
) -> Result<SelectionSource> {
    let files = match paths.first() {
        Some(first) => vec![load_file(first).await?],
        None => Vec::new(),
    };
    Ok(wrap(files))
}
