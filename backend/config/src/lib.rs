//! `textlift-config`: where the OCR endpoint and UI knobs come from.
//!
//! Provides:
//! - Typed config schema
//! - YAML read/write
//! - `${ENV_VAR}` substitution and `TEXTLIFT_*` overrides
//! - Default value application
//! - Validation with field paths

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{LoggingConfig, OcrConfig, TextliftConfig, UiConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load a config file, substitute env vars, apply overrides and defaults,
/// then validate. Warnings are logged; any validation error fails the load.
pub async fn load_and_prepare(path: &Path) -> Result<TextliftConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let raw = load_config(path).await?;
    prepare(raw, &env)
}

/// The pure part of [`load_and_prepare`].
pub fn prepare(raw: TextliftConfig, env: &HashMap<String, String>) -> Result<TextliftConfig> {
    let value = serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: TextliftConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        bail!("{}", report.errors[0]);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepare_substitutes_then_overrides_then_defaults() {
        let raw: TextliftConfig =
            serde_yaml::from_str("ocr:\n  endpoint: http://${OCR_HOST}/ocr\nlogging:\n  level: warn\n")
                .unwrap();

        let cfg = prepare(raw.clone(), &env(&[("OCR_HOST", "scanner:8000")])).unwrap();
        assert_eq!(cfg.endpoint(), "http://scanner:8000/ocr");
        assert_eq!(cfg.log_level(), "warn");
        assert_eq!(cfg.ui.as_ref().unwrap().copy_ack_ms, Some(2000));

        let cfg = prepare(
            raw,
            &env(&[("OCR_HOST", "scanner:8000"), ("TEXTLIFT_ENDPOINT", "https://ocr.example/ocr")]),
        )
        .unwrap();
        assert_eq!(cfg.endpoint(), "https://ocr.example/ocr");
    }

    #[test]
    fn prepare_fails_on_invalid_config() {
        let mut raw = TextliftConfig::default();
        raw.set_endpoint("localhost:8000/ocr");
        let err = prepare(raw, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("ocr.endpoint"));
    }

    #[tokio::test]
    async fn load_and_prepare_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_and_prepare(&config_file_path(dir.path())).await.unwrap();
        assert_eq!(cfg.field_name(), "file");
    }
}
