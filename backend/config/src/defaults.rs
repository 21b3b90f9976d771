//! Config defaults: applies sensible default values to parsed config.

use nutriscan_core::{NutrientKey, SubstitutionMode};

use crate::schema::{
    AlertsConfig, LoggingConfig, NormalizationConfig, NutriScanConfig, OcrConfig, ServerConfig,
};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 5000;

/// 10 MiB upload limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_ALERT_NUTRIENTS: [NutrientKey; 2] =
    [NutrientKey::SaturatedFat, NutrientKey::Sodium];

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: NutriScanConfig) -> NutriScanConfig {
    let config = apply_server_defaults(config);
    let config = apply_ocr_defaults(config);
    let config = apply_normalization_defaults(config);
    let config = apply_alert_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: NutriScanConfig) -> NutriScanConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server
        .bind_address
        .get_or_insert_with(|| DEFAULT_BIND_ADDRESS.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.cors_allow_any.get_or_insert(true);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    config
}

/// The endpoint stays unset; only the timeout has a default.
fn apply_ocr_defaults(mut config: NutriScanConfig) -> NutriScanConfig {
    let ocr = config.ocr.get_or_insert_with(OcrConfig::default);
    ocr.timeout_secs.get_or_insert(DEFAULT_OCR_TIMEOUT_SECS);
    config
}

fn apply_normalization_defaults(mut config: NutriScanConfig) -> NutriScanConfig {
    let normalization = config
        .normalization
        .get_or_insert_with(NormalizationConfig::default);
    normalization
        .substitution
        .get_or_insert(SubstitutionMode::default());
    config
}

fn apply_alert_defaults(mut config: NutriScanConfig) -> NutriScanConfig {
    let alerts = config.alerts.get_or_insert_with(AlertsConfig::default);
    alerts
        .nutrients
        .get_or_insert_with(|| DEFAULT_ALERT_NUTRIENTS.to_vec());
    config
}

fn apply_logging_defaults(mut config: NutriScanConfig) -> NutriScanConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging
        .level
        .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}
