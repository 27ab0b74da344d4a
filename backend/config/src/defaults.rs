//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{LoggingConfig, OcrConfig, TextliftConfig, UiConfig};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ocr";

pub const DEFAULT_FIELD_NAME: &str = "file";

/// Lifetime of the "copied" acknowledgment.
pub const DEFAULT_COPY_ACK_MS: u64 = 2000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Relative to the config directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

pub fn default_accept() -> Vec<String> {
    vec!["image/*".to_string(), ".pdf".to_string()]
}

/// Fill every unset field so a written config documents all knobs.
pub fn apply_all_defaults(config: TextliftConfig) -> TextliftConfig {
    let config = apply_ocr_defaults(config);
    let config = apply_ui_defaults(config);
    apply_logging_defaults(config)
}

fn apply_ocr_defaults(mut config: TextliftConfig) -> TextliftConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.endpoint.get_or_insert_with(|| DEFAULT_ENDPOINT.to_string());
    ocr.field_name.get_or_insert_with(|| DEFAULT_FIELD_NAME.to_string());
    config
}

fn apply_ui_defaults(mut config: TextliftConfig) -> TextliftConfig {
    let ui = config.ui.get_or_insert_with(UiConfig::default);
    ui.copy_ack_ms.get_or_insert(DEFAULT_COPY_ACK_MS);
    ui.accept.get_or_insert_with(default_accept);
    config
}

fn apply_logging_defaults(mut config: TextliftConfig) -> TextliftConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
