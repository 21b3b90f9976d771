//! `nutriscan check-config`: load and validate the configuration file.

use anyhow::Result;
use nutriscan_config::{load_with_report, ValidationReport};
use std::path::Path;

use crate::terminal_output::{note_error, note_info, note_success, note_warn};

/// Returns the report so the caller can choose the exit status.
pub async fn run(path: &Path) -> Result<ValidationReport> {
    note_info(&format!("Checking {}", path.display()));
    if !path.exists() {
        note_warn("Config file not found; built-in defaults apply");
    }

    let (config, report) = load_with_report(path).await?;

    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success(&format!(
            "Config OK (port {}, OCR {}, substitution {:?})",
            config.port(),
            config.ocr_endpoint().unwrap_or("disabled"),
            config.substitution()
        ));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_file_reports_errors() {
        let dir =
            std::env::temp_dir().join(format!("nutriscan-check-config-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("config.yaml");
        tokio::fs::write(&path, "server:\n  port: 0\nocr:\n  endpoint: ftp://ocr\n")
            .await
            .unwrap();

        let report = run(&path).await.unwrap();
        let _ = tokio::fs::remove_dir_all(&dir).await;
        assert!(!report.is_valid());
    }
}
