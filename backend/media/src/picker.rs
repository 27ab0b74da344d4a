//! Directory listing behind the file picker.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::accept::AcceptFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// List `dir` for the picker: subdirectories first, then files the filter
/// accepts, each group sorted by name. Hidden entries are skipped.
pub async fn list_entries(dir: &Path, filter: &AcceptFilter) -> Result<Vec<PickerEntry>> {
    let mut reader = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        let path = entry.path();
        if is_dir || filter.accepts(&path) {
            entries.push(PickerEntry { path, name, is_dir });
        }
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_dirs_then_accepted_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("scans")).unwrap();
        for name in ["b.png", "a.pdf", "notes.txt", ".hidden.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let entries = list_entries(dir.path(), &AcceptFilter::default()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["scans", "a.pdf", "b.png"]);
        assert!(entries[0].is_dir);
    }

    #[tokio::test]
    async fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_entries(&dir.path().join("nope"), &AcceptFilter::default()).await.is_err());
    }
}
