//! Config validation: schema checks with user-friendly error messages.

use crate::schema::NutriScanConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with the first error, if any.
    pub fn ensure_valid(&self) -> anyhow::Result<()> {
        match self.errors.first() {
            None => Ok(()),
            Some(first) => anyhow::bail!("{first} ({} error(s) in total)", self.errors.len()),
        }
    }

    /// Emit every warning and error through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
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

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &NutriScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    validate_alerts(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &NutriScanConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    match server.port {
        Some(0) => report.error("server.port", "port must be > 0"),
        Some(port) if port < 1024 && port != 80 && port != 443 => report.warn(
            "server.port",
            format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
        ),
        _ => {}
    }
    if server.max_upload_bytes == Some(0) {
        report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
    }
    if let Some(bind) = &server.bind_address {
        if bind.trim().is_empty() {
            report.error("server.bindAddress", "bindAddress cannot be empty");
        }
    }
}

fn validate_ocr(config: &NutriScanConfig, report: &mut ValidationReport) {
    match config.ocr_endpoint() {
        None => report.warn(
            "ocr.endpoint",
            "No OCR endpoint configured; image analysis requests will fail",
        ),
        Some(endpoint) if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") => {
            report.error("ocr.endpoint", format!("'{endpoint}' must be an http(s) URL"))
        }
        Some(_) => {}
    }
    if config.ocr.as_ref().and_then(|o| o.timeout_secs) == Some(0) {
        report.error("ocr.timeoutSecs", "timeoutSecs must be > 0");
    }
}

fn validate_alerts(config: &NutriScanConfig, report: &mut ValidationReport) {
    if config.alert_nutrients().is_empty() {
        report.warn("alerts.nutrients", "No alert-worthy nutrients; no alerts will be raised");
    }
}

fn validate_logging(config: &NutriScanConfig, report: &mut ValidationReport) {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    let level = config.log_level();
    // Directive strings such as "nutriscan=debug,info" are accepted as-is.
    let is_directive = level.contains('=') || level.contains(',');
    if !is_directive && !LEVELS.contains(&level.to_lowercase().as_str()) {
        report.warn("logging.level", format!("Unrecognized log level '{level}'"));
    }
}
