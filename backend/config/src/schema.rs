//! Configuration schema, typed for serde YAML/JSON deserialization.
//!
//! Every field is optional in the file; [`crate::defaults`] fills the gaps and
//! the accessors on [`NutriScanConfig`] fall back to the same constants.

use nutriscan_core::{NutrientKey, SubstitutionMode};
use serde::{Deserialize, Serialize};

use crate::defaults::{
    DEFAULT_ALERT_NUTRIENTS, DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_OCR_TIMEOUT_SECS, DEFAULT_PORT,
};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutriScanConfig {
    /// HTTP serving layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// External OCR collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Text normalization heuristics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationConfig>,

    /// Alert-worthy nutrients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<AlertsConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Allow cross-origin requests from any origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_allow_any: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// URL receiving multipart image uploads; image analysis is disabled when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution: Option<SubstitutionMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<Vec<NutrientKey>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON log files; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl NutriScanConfig {
    pub fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind_address.as_deref())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn cors_allow_any(&self) -> bool {
        self.server.as_ref().and_then(|s| s.cors_allow_any).unwrap_or(true)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|s| s.max_upload_bytes)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn ocr_endpoint(&self) -> Option<&str> {
        self.ocr
            .as_ref()
            .and_then(|o| o.endpoint.as_deref())
            .filter(|e| !e.trim().is_empty())
    }

    pub fn ocr_api_key(&self) -> Option<&str> {
        self.ocr.as_ref().and_then(|o| o.api_key.as_deref())
    }

    pub fn ocr_timeout_secs(&self) -> u64 {
        self.ocr
            .as_ref()
            .and_then(|o| o.timeout_secs)
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS)
    }

    pub fn substitution(&self) -> SubstitutionMode {
        self.normalization
            .as_ref()
            .and_then(|n| n.substitution)
            .unwrap_or_default()
    }

    pub fn alert_nutrients(&self) -> Vec<NutrientKey> {
        self.alerts
            .as_ref()
            .and_then(|a| a.nutrients.clone())
            .unwrap_or_else(|| DEFAULT_ALERT_NUTRIENTS.to_vec())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
server:
  bindAddress: 127.0.0.1
  port: 8088
  maxUploadBytes: 2048
ocr:
  endpoint: http://ocr.local/readtext
  timeoutSecs: 5
normalization:
  substitution: numeric_context
alerts:
  nutrients: [sodium, sugars]
logging:
  level: debug
  json: true
"#;
        let cfg: NutriScanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.bind_address(), "127.0.0.1");
        assert_eq!(cfg.port(), 8088);
        assert_eq!(cfg.max_upload_bytes(), 2048);
        assert_eq!(cfg.ocr_endpoint(), Some("http://ocr.local/readtext"));
        assert_eq!(cfg.ocr_timeout_secs(), 5);
        assert_eq!(cfg.substitution(), SubstitutionMode::NumericContext);
        assert_eq!(cfg.alert_nutrients(), vec![NutrientKey::Sodium, NutrientKey::Sugars]);
        assert_eq!(cfg.log_level(), "debug");
        assert!(cfg.log_json());
    }

    #[test]
    fn empty_config_uses_fallbacks() {
        let cfg = NutriScanConfig::default();
        assert_eq!(cfg.port(), DEFAULT_PORT);
        assert_eq!(cfg.substitution(), SubstitutionMode::Global);
        assert_eq!(
            cfg.alert_nutrients(),
            vec![NutrientKey::SaturatedFat, NutrientKey::Sodium]
        );
        assert!(cfg.ocr_endpoint().is_none());
    }

    #[test]
    fn unknown_nutrient_is_rejected() {
        let yaml = "alerts:\n  nutrients: [vitamin_c]\n";
        assert!(serde_yaml::from_str::<NutriScanConfig>(yaml).is_err());
    }
}
