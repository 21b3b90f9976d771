//! Main HTTP Gateway Server.

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use nutriscan_config::NutriScanConfig;
use nutriscan_core::OcrEngine;
use nutriscan_understanding::{AlertPolicy, DisabledOcrEngine, HttpOcrEngine, NutritionAnalyzer};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::{analyze, health_api};

/// Application state shared across routes. Everything in it is read-only.
#[derive(Clone)]
pub struct GatewayState {
    pub analyzer: Arc<NutritionAnalyzer>,
    pub ocr: Arc<dyn OcrEngine>,
    pub max_upload_bytes: usize,
    pub cors_allow_any: bool,
}

impl GatewayState {
    pub fn new(analyzer: NutritionAnalyzer, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            ocr,
            max_upload_bytes: nutriscan_config::defaults::DEFAULT_MAX_UPLOAD_BYTES,
            cors_allow_any: true,
        }
    }

    /// Build the analyzer and OCR collaborator described by `config`.
    pub fn from_config(config: &NutriScanConfig) -> Result<Self> {
        let mut state = Self::new(analyzer_from_config(config), ocr_from_config(config)?);
        state.max_upload_bytes = config.max_upload_bytes();
        state.cors_allow_any = config.cors_allow_any();
        Ok(state)
    }
}

pub fn analyzer_from_config(config: &NutriScanConfig) -> NutritionAnalyzer {
    NutritionAnalyzer::new()
        .with_substitution(config.substitution())
        .with_alert_policy(AlertPolicy::new(config.alert_nutrients()))
}

pub fn ocr_from_config(config: &NutriScanConfig) -> Result<Arc<dyn OcrEngine>> {
    match config.ocr_endpoint() {
        Some(endpoint) => {
            let timeout = Duration::from_secs(config.ocr_timeout_secs());
            let engine = HttpOcrEngine::new(endpoint, timeout)
                .context("Failed to build OCR client")?
                .with_api_key(config.ocr_api_key().map(str::to_string));
            Ok(Arc::new(engine))
        }
        None => {
            warn!("No OCR endpoint configured; image analysis is disabled");
            Ok(Arc::new(DisabledOcrEngine))
        }
    }
}

/// Build the router with every route and middleware layer.
pub fn build_router(state: GatewayState) -> Router {
    let mut app = Router::new()
        .route("/", get(health_api::index))
        .route("/api/health", get(health_api::get_health))
        .route("/analyze", post(analyze::analyze))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if state.cors_allow_any {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

/// Starts the HTTP server and runs until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_config::schema::{AlertsConfig, NormalizationConfig, OcrConfig};
    use nutriscan_core::{NutrientKey, SubstitutionMode};

    #[test]
    fn state_without_endpoint_uses_disabled_engine() {
        let state = GatewayState::from_config(&NutriScanConfig::default()).unwrap();
        assert_eq!(state.ocr.name(), "disabled");
        assert!(state.cors_allow_any);
    }

    #[tokio::test]
    async fn state_follows_config() {
        let config = NutriScanConfig {
            ocr: Some(OcrConfig {
                endpoint: Some("http://127.0.0.1:9/readtext".into()),
                ..Default::default()
            }),
            normalization: Some(NormalizationConfig {
                substitution: Some(SubstitutionMode::Off),
            }),
            alerts: Some(AlertsConfig {
                nutrients: Some(vec![NutrientKey::Sugars]),
            }),
            ..Default::default()
        };
        let state = GatewayState::from_config(&config).unwrap();
        assert_eq!(state.ocr.name(), "http");
        assert_eq!(state.analyzer.substitution(), SubstitutionMode::Off);
        assert!(state.analyzer.alert_policy().is_alert_worthy(NutrientKey::Sugars));
        assert!(!state.analyzer.alert_policy().is_alert_worthy(NutrientKey::Sodium));
    }

    #[test]
    fn router_builds() {
        let state = GatewayState::new(NutritionAnalyzer::new(), Arc::new(DisabledOcrEngine));
        let _router = build_router(state);
    }
}
