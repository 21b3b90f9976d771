//! Config file loading.

use crate::env::resolve_env_vars;
use crate::schema::NutriScanConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the NutriScan config directory.
/// Priority: `NUTRISCAN_CONFIG_DIR` env > `~/.nutriscan/` > `./.nutriscan`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NUTRISCAN_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".nutriscan"),
        None => PathBuf::from(".nutriscan"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk, substituting `${VAR}` references.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<NutriScanConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(NutriScanConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&raw, resolve_env_vars)
        .with_context(|| format!("Failed to load config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse YAML text into a typed config, running `resolve` over the value tree first.
pub fn parse_config(
    raw: &str,
    resolve: impl FnOnce(&Value) -> Result<Value>,
) -> Result<NutriScanConfig> {
    if raw.trim().is_empty() {
        return Ok(NutriScanConfig::default());
    }
    let value: Value = serde_yaml::from_str(raw).context("Failed to parse config YAML")?;
    // A comment-only document parses as null.
    if value.is_null() {
        return Ok(NutriScanConfig::default());
    }
    let value = resolve(&value).context("Failed to resolve env vars in config")?;
    serde_json::from_value(value).context("Config does not match schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::resolve_env_vars_with;
    use std::collections::HashMap;

    #[test]
    fn parses_with_substitution() {
        let env: HashMap<String, String> =
            [("OCR_HOST".to_string(), "ocr.internal".to_string())].into();
        let cfg = parse_config(
            "ocr:\n  endpoint: http://${OCR_HOST}/readtext\n",
            |v| resolve_env_vars_with(v, &env),
        )
        .unwrap();
        assert_eq!(cfg.ocr_endpoint(), Some("http://ocr.internal/readtext"));
    }

    #[test]
    fn empty_file_is_default() {
        let cfg = parse_config("", |v| Ok(v.clone())).unwrap();
        assert_eq!(cfg, NutriScanConfig::default());
    }

    #[test]
    fn schema_mismatch_is_error() {
        assert!(parse_config("server:\n  port: not-a-port\n", |v| Ok(v.clone())).is_err());
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("nutriscan-config-test-missing/config.yaml");
        let cfg = load_config(&path).await.unwrap();
        assert_eq!(cfg, NutriScanConfig::default());
    }

    #[tokio::test]
    async fn loads_file_from_disk() {
        let dir =
            std::env::temp_dir().join(format!("nutriscan-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).await.unwrap();
        let path = config_file_path(&dir);
        fs::write(&path, "server:\n  port: 6001\nalerts:\n  nutrients: [sodium]\n")
            .await
            .unwrap();

        let cfg = load_config(&path).await.unwrap();
        assert_eq!(cfg.port(), 6001);
        assert_eq!(cfg.alert_nutrients(), vec![nutriscan_core::NutrientKey::Sodium]);

        let _ = fs::remove_dir_all(&dir).await;
    }
}
