//! Response bodies for `POST /analyze`.
//!
//! Every outcome is an HTTP 200 with a `success` flag; failures carry only an
//! error message.

use nutriscan_core::{AnalysisPayload, NutriError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSuccess {
    pub success: bool,
    /// Demographic whose reference table was used.
    pub gender: String,
    /// True when the requested gender was missing or unrecognized.
    pub gender_defaulted: bool,
    pub extracted_text: String,
    #[serde(flatten)]
    pub payload: AnalysisPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeFailure {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Success(AnalyzeSuccess),
    Failure(AnalyzeFailure),
}

impl AnalyzeResponse {
    pub fn failure(error: &NutriError) -> Self {
        AnalyzeResponse::Failure(AnalyzeFailure {
            success: false,
            error: error.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalyzeResponse::Success(_))
    }
}

impl From<Result<AnalyzeSuccess, NutriError>> for AnalyzeResponse {
    fn from(result: Result<AnalyzeSuccess, NutriError>) -> Self {
        match result {
            Ok(success) => AnalyzeResponse::Success(success),
            Err(e) => AnalyzeResponse::failure(&e),
        }
    }
}
