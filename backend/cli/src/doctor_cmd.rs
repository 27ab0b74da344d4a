//! CLI Doctor Command
//!
//! Checks the config, the OCR endpoint and the clipboard, and reports each.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;
use tokio::net::TcpStream;
use tracing::debug;

use textlift_clipboard::SystemClipboard;
use textlift_config::{load_config, prepare, validate, TextliftConfig};

use crate::terminal_output::{note_error, note_info, note_success, note_warn, render_fields, supports_color};

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Executes the full doctor diagnosis.
pub async fn run(config_path: &Path, endpoint_override: Option<&str>) -> Result<()> {
    eprintln!("\n🔍 Running textlift doctor...\n");

    let Some(mut config) = check_config(config_path).await else {
        bail!("Some checks failed. Please fix the errors above.");
    };
    if let Some(endpoint) = endpoint_override {
        config.set_endpoint(endpoint);
    }

    let endpoint_ok = check_endpoint(config.endpoint()).await;
    check_clipboard();

    eprintln!();
    if endpoint_ok {
        note_success("All checks passed.");
        Ok(())
    } else {
        bail!("Some checks failed. Please fix the errors above.");
    }
}

async fn check_config(path: &Path) -> Option<TextliftConfig> {
    eprintln!("Config:");
    if !path.exists() {
        note_info(&format!("{} not found, using defaults", path.display()));
    }

    let raw = match load_config(path).await {
        Ok(raw) => raw,
        Err(e) => {
            note_error(&format!("{e:#}"));
            return None;
        }
    };
    let env: HashMap<String, String> = std::env::vars().collect();
    // Every validation error is logged by prepare; the note shows the first
    let config = match prepare(raw, &env) {
        Ok(config) => config,
        Err(e) => {
            note_error(&format!("{e:#}"));
            return None;
        }
    };

    for warning in validate(&config).warnings {
        note_warn(&warning.to_string());
    }
    eprint!(
        "{}",
        render_fields(
            &[
                ("file", path.display().to_string()),
                ("endpoint", config.endpoint().to_string()),
                ("fieldName", config.field_name().to_string()),
                ("copyAckMs", config.copy_ack().as_millis().to_string()),
            ],
            supports_color(),
        )
    );
    note_success("Config is valid");
    Some(config)
}

async fn check_endpoint(endpoint: &str) -> bool {
    eprintln!("\nOCR endpoint:");
    let (host, port) = match endpoint_addr(endpoint) {
        Ok(addr) => addr,
        Err(e) => {
            note_error(&format!("{e:#}"));
            return false;
        }
    };
    match probe(&host, port, PROBE_TIMEOUT).await {
        Ok(()) => {
            note_success(&format!("{host}:{port} is reachable"));
            true
        }
        Err(e) => {
            note_error(&format!("{host}:{port} is unreachable: {e:#}"));
            false
        }
    }
}

fn check_clipboard() {
    eprintln!("\nClipboard:");
    match SystemClipboard::new() {
        Ok(_) => note_success("System clipboard available"),
        Err(e) => note_warn(&format!("System clipboard unavailable, copy stays in-process: {e:#}")),
    }
}

pub fn endpoint_addr(endpoint: &str) -> Result<(String, u16)> {
    let url = Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("Endpoint has no host: {endpoint}"))?
        .to_string();
    let port = url
        .port_or_known_default()
        .ok_or_else(|| anyhow!("Endpoint has no port: {endpoint}"))?;
    Ok((host, port))
}

pub async fn probe(host: &str, port: u16, timeout: Duration) -> Result<()> {
    debug!(host, port, "Probing endpoint");
    tokio::time::timeout(timeout, TcpStream::connect((host, port)))
        .await
        .context("timed out")?
        .context("connection failed")?;
    Ok(())
}
