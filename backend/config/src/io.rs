//! Config file location, reading and atomic writing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::TextliftConfig;

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the textlift config directory.
/// Priority: `TEXTLIFT_CONFIG_DIR` env > `~/.textlift/` > `./.textlift`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TEXTLIFT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".textlift"),
        None => PathBuf::from(".textlift"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<TextliftConfig> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(TextliftConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // An empty file parses as YAML null.
    if raw.trim().is_empty() {
        return Ok(TextliftConfig::default());
    }

    let config: TextliftConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &TextliftConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&config_file_path(dir.path())).await.unwrap();
        assert_eq!(cfg, TextliftConfig::default());
    }

    #[tokio::test]
    async fn empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_config(&path).await.unwrap(), TextliftConfig::default());
    }

    #[tokio::test]
    async fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let mut cfg = TextliftConfig::default();
        cfg.set_endpoint("http://ocr.internal/ocr");

        write_config(&cfg, &path).await.unwrap();
        assert!(!path.with_extension("yaml.tmp").exists());
        assert_eq!(load_config(&path).await.unwrap(), cfg);
    }

    #[tokio::test]
    async fn invalid_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "ocr: [unclosed").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("config.yaml"));
    }
}
