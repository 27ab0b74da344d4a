//! `textlift config show|path|init`

use std::path::Path;

use anyhow::{bail, Result};
use textlift_config::{apply_all_defaults, write_config, TextliftConfig};

use crate::terminal_output::note_success;

/// Effective config as YAML.
pub fn show(config: &TextliftConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Write a file holding every default, refusing to clobber an existing one
/// unless `force` is set.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let config = apply_all_defaults(TextliftConfig::default());
    write_config(&config, path).await?;
    note_success(&format!("Wrote {}", path.display()));
    Ok(())
}
