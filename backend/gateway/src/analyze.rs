//! `POST /analyze`: nutrition label photo in, nutrient analysis out.
//!
//! Multipart fields: `image` (required), `gender` (optional, defaults to male),
//! `preferences` (accepted and ignored).

use axum::{
    extract::{Multipart, State},
    Json,
};
use nutriscan_core::{join_fragments, NutriError};
use nutriscan_logging::{excerpt, AnalysisEvent, EventLogger};
use nutriscan_understanding::ImageFormat;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::response::{AnalyzeResponse, AnalyzeSuccess};
use crate::server::GatewayState;

/// Fields read from the multipart body.
#[derive(Debug, Default)]
pub struct LabelUpload {
    pub image: Option<Vec<u8>>,
    pub gender: Option<String>,
    pub preferences: Option<String>,
}

/// Handler for `POST /analyze`. Always answers 200 with a `success` flag.
pub async fn analyze(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Json<AnalyzeResponse> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("analyze", request_id = %request_id);

    async move {
        let result = match read_upload(multipart).await {
            Ok(upload) => {
                if let Some(prefs) = upload.preferences.as_deref() {
                    debug!(len = prefs.len(), "Ignoring preferences field");
                }
                analyze_upload(&state, upload.image.as_deref(), upload.gender.as_deref()).await
            }
            Err(e) => Err(e),
        };
        log_outcome(&request_id, &result);
        Json(AnalyzeResponse::from(result))
    }
    .instrument(span)
    .await
}

async fn read_upload(mut multipart: Multipart) -> Result<LabelUpload, NutriError> {
    let mut upload = LabelUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                upload.image = Some(field.bytes().await.map_err(invalid_body)?.to_vec())
            }
            Some("gender") => upload.gender = Some(field.text().await.map_err(invalid_body)?),
            Some("preferences") => {
                upload.preferences = Some(field.text().await.map_err(invalid_body)?)
            }
            other => debug!(field = ?other, "Ignoring unknown multipart field"),
        }
    }

    Ok(upload)
}

fn invalid_body(e: axum::extract::multipart::MultipartError) -> NutriError {
    NutriError::InvalidUpload(format!("malformed multipart body: {e}"))
}

/// Validate the image, run OCR, and analyze the recognized text.
pub async fn analyze_upload(
    state: &GatewayState,
    image: Option<&[u8]>,
    gender: Option<&str>,
) -> Result<AnalyzeSuccess, NutriError> {
    let image = image.ok_or(NutriError::MissingImage)?;
    let format = ImageFormat::check(image)?;
    debug!(
        bytes = image.len(),
        format = format.extension(),
        engine = state.ocr.name(),
        "Running OCR"
    );

    let fragments = state.ocr.recognize(image).await?;
    let extracted_text = join_fragments(&fragments);
    let report = state.analyzer.analyze_text(&extracted_text, gender);

    Ok(AnalyzeSuccess {
        success: true,
        gender: report.selection.demographic.as_str().to_string(),
        gender_defaulted: report.selection.defaulted,
        extracted_text,
        payload: report.payload,
    })
}

fn log_outcome(request_id: &str, result: &Result<AnalyzeSuccess, NutriError>) {
    let event = match result {
        Ok(ok) => AnalysisEvent::Completed {
            nutrients_found: ok.payload.nutrition_data.len(),
            alerts: ok.payload.alerts.len(),
            demographic: ok.gender.clone(),
            defaulted: ok.gender_defaulted,
            excerpt: excerpt(&ok.extracted_text),
        },
        Err(e) if e.is_input_error() => AnalysisEvent::Rejected { reason: e.to_string() },
        Err(e) => AnalysisEvent::Failed { error: e.to_string() },
    };
    EventLogger::log_event(request_id, event);
}
