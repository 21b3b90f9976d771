//! Liveness endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr_engine: String,
}

/// Handler for `GET /`
pub async fn index() -> &'static str {
    "Nutrition Label Analyzer API is running"
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "nutriscan",
        version: env!("CARGO_PKG_VERSION"),
        ocr_engine: state.ocr.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_understanding::{DisabledOcrEngine, NutritionAnalyzer};
    use std::sync::Arc;

    #[tokio::test]
    async fn index_banner() {
        assert_eq!(index().await, "Nutrition Label Analyzer API is running");
    }

    #[tokio::test]
    async fn health_reports_engine() {
        let state = GatewayState::new(NutritionAnalyzer::new(), Arc::new(DisabledOcrEngine));
        let Json(report) = get_health(State(state)).await;
        assert_eq!(report.status, "ok");
        assert_eq!(report.ocr_engine, "disabled");
    }
}
