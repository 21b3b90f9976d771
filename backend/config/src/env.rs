//! Environment variable handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` substitution inside string values of the config file,
//!   resolved at load time. Only uppercase `[A-Z_][A-Z0-9_]*` names are
//!   matched and `$${VAR}` escapes to a literal `${VAR}`.
//! - `NUTRISCAN_*` overrides applied on top of the loaded file.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::{LoggingConfig, NutriScanConfig, OcrConfig, ServerConfig};

/// `${VAR}`, optionally preceded by the `$` escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_BIND: &str = "NUTRISCAN_BIND";
pub const ENV_PORT: &str = "NUTRISCAN_PORT";
pub const ENV_OCR_URL: &str = "NUTRISCAN_OCR_URL";
pub const ENV_OCR_API_KEY: &str = "NUTRISCAN_OCR_API_KEY";
pub const ENV_LOG_LEVEL: &str = "RUST_LOG";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Walks the entire value tree recursively; only string leaves are processed.
/// Returns an error if any referenced env var is not set or is empty.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        // Primitives pass through unchanged.
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut error: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(s, |caps: &Captures| {
        let var_name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{var_name}}}");
        }
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                error.get_or_insert_with(|| MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = error {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply `NUTRISCAN_*` overrides from the process environment.
pub fn apply_env_overrides(config: NutriScanConfig) -> NutriScanConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

pub fn apply_env_overrides_with(
    mut config: NutriScanConfig,
    env: &HashMap<String, String>,
) -> NutriScanConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();

    if let Some(bind) = get(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind_address = Some(bind);
    }
    if let Some(port) = get(ENV_PORT) {
        match port.parse::<u16>() {
            Ok(port) => config.server.get_or_insert_with(ServerConfig::default).port = Some(port),
            Err(_) => debug!(value = %port, "Ignoring non-numeric {ENV_PORT}"),
        }
    }
    if let Some(url) = get(ENV_OCR_URL) {
        config.ocr.get_or_insert_with(OcrConfig::default).endpoint = Some(url);
    }
    if let Some(key) = get(ENV_OCR_API_KEY) {
        config.ocr.get_or_insert_with(OcrConfig::default).api_key = Some(key);
    }
    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    config
}
