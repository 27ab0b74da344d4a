//! `${VAR}` substitution in config string values, plus the few environment
//! variables that override the file directly.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are substituted. `$${VAR}` is an
//! escape and yields the literal `${VAR}`.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{LoggingConfig, TextliftConfig};

/// A reference, optionally preceded by the `$` escape.
static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid regex"));

pub const ENV_ENDPOINT: &str = "TEXTLIFT_ENDPOINT";
pub const ENV_LOG_LEVEL: &str = "TEXTLIFT_LOG_LEVEL";

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute references across a JSON value tree using the given map.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    Ok(walk(value, env, "")?)
}

fn walk(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value, MissingEnvVarError> {
    Ok(match value {
        Value::String(s) => Value::String(substitute(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| walk(v, env, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, MissingEnvVarError>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, v) in map {
                let child = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                out.insert(key.clone(), walk(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing = None;
    let replaced = REFERENCE.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Apply `TEXTLIFT_ENDPOINT` and `TEXTLIFT_LOG_LEVEL` on top of the file.
pub fn apply_env_overrides(mut config: TextliftConfig, env: &HashMap<String, String>) -> TextliftConfig {
    if let Some(endpoint) = env.get(ENV_ENDPOINT).filter(|v| !v.is_empty()) {
        config.set_endpoint(endpoint.clone());
    }
    if let Some(level) = env.get(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.clone());
    }
    config
}
