//! textlift configuration schema, typed for serde YAML/JSON.
//!
//! Every field is optional on disk; [`crate::defaults`] fills the gaps and the
//! accessors below never return an unset value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::defaults;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextliftConfig {
    /// Remote OCR service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Terminal UI behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// Full URL of the `POST /ocr` endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Multipart field carrying the file bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// How long the "copied" indicator stays up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_ack_ms: Option<u64>,
    /// Picker filter, e.g. `["image/*", ".pdf"]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl TextliftConfig {
    pub fn endpoint(&self) -> &str {
        self.ocr
            .as_ref()
            .and_then(|o| o.endpoint.as_deref())
            .unwrap_or(defaults::DEFAULT_ENDPOINT)
    }

    pub fn field_name(&self) -> &str {
        self.ocr
            .as_ref()
            .and_then(|o| o.field_name.as_deref())
            .unwrap_or(defaults::DEFAULT_FIELD_NAME)
    }

    pub fn copy_ack(&self) -> Duration {
        let ms = self
            .ui
            .as_ref()
            .and_then(|u| u.copy_ack_ms)
            .unwrap_or(defaults::DEFAULT_COPY_ACK_MS);
        Duration::from_millis(ms)
    }

    pub fn accept(&self) -> Vec<String> {
        self.ui
            .as_ref()
            .and_then(|u| u.accept.clone())
            .unwrap_or_else(defaults::default_accept)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(defaults::DEFAULT_LOG_LEVEL)
    }

    /// Log directory; relative paths resolve against `config_dir`.
    pub fn log_dir(&self, config_dir: &Path) -> PathBuf {
        match self.logging.as_ref().and_then(|l| l.dir.as_deref()) {
            Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => config_dir.join(dir),
            None => config_dir.join(defaults::DEFAULT_LOG_DIR),
        }
    }

    /// Override the endpoint, e.g. from `--endpoint`.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.ocr.get_or_insert_with(OcrConfig::default).endpoint = Some(endpoint.into());
    }
}
