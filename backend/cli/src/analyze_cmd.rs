//! `nutriscan analyze`: run the pipeline locally on text or an image.

use anyhow::{Context, Result};
use nutriscan_config::NutriScanConfig;
use nutriscan_core::RdvStatus;
use nutriscan_gateway::{
    analyze_upload, server::analyzer_from_config, AnalyzeResponse, AnalyzeSuccess, GatewayState,
};
use std::path::PathBuf;

use crate::terminal_output::{paint, render_table, Column, GREEN, RED, YELLOW};

/// Where the label content comes from.
#[derive(Debug, Clone)]
pub enum AnalyzeInput {
    /// Already-recognized text.
    Text(String),
    /// File containing recognized text.
    TextFile(PathBuf),
    /// Label photo, sent to the configured OCR service.
    Image(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub async fn run(
    config: &NutriScanConfig,
    input: AnalyzeInput,
    gender: Option<&str>,
) -> Result<AnalyzeResponse> {
    let result = match input {
        AnalyzeInput::Text(text) => Ok(analyze_text(config, text, gender)),
        AnalyzeInput::TextFile(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read text file: {}", path.display()))?;
            Ok(analyze_text(config, text, gender))
        }
        AnalyzeInput::Image(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read image: {}", path.display()))?;
            let state = GatewayState::from_config(config)?;
            analyze_upload(&state, Some(bytes.as_slice()), gender).await
        }
    };
    Ok(AnalyzeResponse::from(result))
}

fn analyze_text(config: &NutriScanConfig, text: String, gender: Option<&str>) -> AnalyzeSuccess {
    let report = analyzer_from_config(config).analyze_text(&text, gender);
    AnalyzeSuccess {
        success: true,
        gender: report.selection.demographic.as_str().to_string(),
        gender_defaulted: report.selection.defaulted,
        extracted_text: text,
        payload: report.payload,
    }
}

pub fn render(response: &AnalyzeResponse, format: OutputFormat) -> Result<String> {
    match (format, response) {
        (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(response)?),
        (OutputFormat::Table, AnalyzeResponse::Success(ok)) => Ok(render_success_table(ok)),
        (OutputFormat::Table, AnalyzeResponse::Failure(fail)) => {
            Ok(format!("analysis failed: {}\n", fail.error))
        }
    }
}

fn render_success_table(ok: &AnalyzeSuccess) -> String {
    let columns = [
        Column::left("Nutrient"),
        Column::right("Amount"),
        Column::right("% RDV"),
        Column::left("Status"),
    ];
    let rows: Vec<Vec<String>> = ok
        .payload
        .rdv_analysis
        .iter()
        .map(|(key, entry)| {
            let amount = ok.payload.nutrition_data.get(*key).unwrap_or_default();
            let color = match entry.status {
                RdvStatus::AboveTarget => RED,
                RdvStatus::WithinRange => GREEN,
            };
            vec![
                key.label().to_string(),
                format!("{amount}{}", key.unit().suffix()),
                entry.rendered(),
                paint(entry.status.describe(), color),
            ]
        })
        .collect();

    let defaulted = if ok.gender_defaulted { " (default)" } else { "" };
    let mut out = format!("Reference table: {}{defaulted}\n\n", ok.gender);
    if rows.is_empty() {
        out.push_str("No nutrients detected.\n");
    } else {
        out.push_str(&render_table(&columns, &rows));
    }
    for alert in &ok.payload.alerts {
        out.push_str(&format!("\n{}", paint(alert, YELLOW)));
    }
    out
}

/// Whether the response should produce a non-zero exit status.
pub fn is_failure(response: &AnalyzeResponse) -> bool {
    !response.is_success()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "Total Fat: 10g Saturated Fat: 25g Sodium: 2500mg Protein 5g";

    #[tokio::test]
    async fn analyzes_inline_text() {
        let input = AnalyzeInput::Text(LABEL.into());
        let resp = run(&NutriScanConfig::default(), input, Some("female")).await.unwrap();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["gender"], "female");
        assert_eq!(json["extractedText"], LABEL);
        assert_eq!(json["rdvAnalysis"]["protein"]["percentage"], "10.9%");
        assert_eq!(json["alerts"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn analyzes_text_file() {
        let path = std::env::temp_dir()
            .join(format!("nutriscan-cli-label-{}.txt", std::process::id()));
        tokio::fs::write(&path, "Sugars 12g\nDietary Fiber 4g").await.unwrap();
        let resp = run(&NutriScanConfig::default(), AnalyzeInput::TextFile(path.clone()), None)
            .await
            .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let AnalyzeResponse::Success(ok) = resp else { panic!("expected success") };
        assert!(ok.gender_defaulted);
        assert_eq!(ok.payload.nutrition_data.len(), 2);
    }

    #[tokio::test]
    async fn missing_text_file_is_error() {
        let path = PathBuf::from("/nonexistent/nutriscan/label.txt");
        let result = run(&NutriScanConfig::default(), AnalyzeInput::TextFile(path), None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn image_without_ocr_endpoint_fails_in_response() {
        let path = std::env::temp_dir()
            .join(format!("nutriscan-cli-label-{}.png", std::process::id()));
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).await.unwrap();
        let resp = run(&NutriScanConfig::default(), AnalyzeInput::Image(path.clone()), None)
            .await
            .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert!(is_failure(&resp));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "no OCR engine configured");
    }

    #[tokio::test]
    async fn table_lists_nutrients_and_alerts() {
        let resp = run(&NutriScanConfig::default(), AnalyzeInput::Text(LABEL.into()), None)
            .await
            .unwrap();
        let rendered = render(&resp, OutputFormat::Table).unwrap();
        let table = crate::terminal_output::strip_ansi(&rendered);
        assert!(table.contains("Reference table: male (default)"));
        assert!(table.contains("saturated fat"));
        assert!(table.contains("125.0%"));
        assert!(table.contains("Higher than RDV"));
        assert!(table.contains("High sodium content detected."));
    }
}
