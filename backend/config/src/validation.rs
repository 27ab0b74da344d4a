//! Config validation with field paths in every message.

use crate::schema::TextliftConfig;
use thiserror::Error;
use url::Url;

/// Above this the "copied" indicator effectively never resets.
const COPY_ACK_WARN_MS: u64 = 60_000;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &TextliftConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_ocr(config, &mut report);
    validate_ui(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_ocr(config: &TextliftConfig, report: &mut ValidationReport) {
    match Url::parse(config.endpoint()) {
        Err(e) => report.error("ocr.endpoint", format!("Endpoint is not a valid URL: {e}")),
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            report.error("ocr.endpoint", "Endpoint must be an http:// or https:// URL")
        }
        Ok(url) if url.host_str().map_or(true, str::is_empty) => {
            report.error("ocr.endpoint", "Endpoint has no host")
        }
        Ok(url) if url.path() == "/" => {
            report.warn("ocr.endpoint", "Endpoint has no path; the service usually listens on /ocr")
        }
        Ok(_) => {}
    }

    if config.field_name().trim().is_empty() {
        report.error("ocr.fieldName", "Multipart field name cannot be empty");
    }
}

fn validate_ui(config: &TextliftConfig, report: &mut ValidationReport) {
    let Some(ui) = &config.ui else { return };

    match ui.copy_ack_ms {
        Some(0) => report.error("ui.copyAckMs", "copyAckMs must be > 0"),
        Some(ms) if ms > COPY_ACK_WARN_MS => {
            report.warn("ui.copyAckMs", format!("{ms} ms is longer than a minute"))
        }
        _ => {}
    }

    for (i, entry) in ui.accept.iter().flatten().enumerate() {
        let entry = entry.trim();
        let well_formed = match entry.strip_prefix('.') {
            Some(ext) => !ext.is_empty() && !ext.contains('/'),
            None => matches!(entry.split_once('/'), Some((top, sub)) if !top.is_empty() && !sub.is_empty()),
        };
        if !well_formed {
            report.error(
                format!("ui.accept[{i}]"),
                format!("'{entry}' is neither a MIME type nor a .extension"),
            );
        }
    }
}

fn validate_logging(config: &TextliftConfig, report: &mut ValidationReport) {
    let level = config.log_level();
    // Full EnvFilter directives like "textlift_core=debug" are allowed.
    let known = ["trace", "debug", "info", "warn", "error", "off"];
    if !level.contains('=') && !known.contains(&level.to_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}
