//! OCR collaborators.
//!
//! Text recognition runs in an external service. [`HttpOcrEngine`] uploads the
//! image as multipart form data and reads back the recognized fragments.

use async_trait::async_trait;
use nutriscan_core::{NutriError, OcrEngine};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::image_format::ImageFormat;

const ENGINE_NAME: &str = "http";

/// Posts images to a remote OCR endpoint.
pub struct HttpOcrEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpOcrEngine {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NutriError> {
        let endpoint = endpoint.into();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(NutriError::Config(format!(
                "OCR endpoint '{endpoint}' must be an http(s) URL"
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nutriscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NutriError::ocr(ENGINE_NAME, e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }
}

#[async_trait]
impl OcrEngine for HttpOcrEngine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    async fn recognize(&self, image: &[u8]) -> Result<Vec<String>, NutriError> {
        let format = ImageFormat::check(image)?;
        info!(
            endpoint = %self.endpoint,
            bytes = image.len(),
            format = format.extension(),
            "Sending image to OCR service"
        );

        let part = reqwest::multipart::Part::bytes(image.to_vec())
            .file_name(format!("label.{}", format.extension()))
            .mime_str(format.mime_type())
            .map_err(|e| NutriError::ocr(ENGINE_NAME, e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| NutriError::ocr(ENGINE_NAME, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "OCR service returned an error");
            return Err(NutriError::ocr(ENGINE_NAME, format!("HTTP {status}: {body}")));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| NutriError::ocr(ENGINE_NAME, format!("invalid response body: {e}")))?;
        let fragments = parse_fragments(&json)?;
        debug!(fragments = fragments.len(), "OCR fragments received");
        Ok(fragments)
    }
}

/// Accepts `["a", "b"]`, `{"fragments": [...]}`, `{"results": [...]}` or `{"text": "..."}`.
///
/// Array items may be plain strings or objects carrying a `text` field.
pub fn parse_fragments(json: &Value) -> Result<Vec<String>, NutriError> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return Ok(vec![text.clone()]);
            }
            match map.get("fragments").or_else(|| map.get("results")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(NutriError::ocr(
                        ENGINE_NAME,
                        "response has no fragments, results, or text field",
                    ))
                }
            }
        }
        _ => return Err(NutriError::ocr(ENGINE_NAME, "unexpected response shape")),
    };

    Ok(items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj.get("text").and_then(|t| t.as_str()).map(str::to_string),
            _ => None,
        })
        .collect())
}

/// Placeholder used when no OCR endpoint is configured.
pub struct DisabledOcrEngine;

#[async_trait]
impl OcrEngine for DisabledOcrEngine {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<Vec<String>, NutriError> {
        Err(NutriError::OcrUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_array() {
        let out = parse_fragments(&json!(["Total Fat", "10g"])).unwrap();
        assert_eq!(out, vec!["Total Fat", "10g"]);
    }

    #[test]
    fn parses_detailed_results() {
        let out = parse_fragments(&json!({
            "results": [{ "text": "Sodium", "confidence": 0.9 }, { "text": "5mg" }, 42]
        }))
        .unwrap();
        assert_eq!(out, vec!["Sodium", "5mg"]);
    }

    #[test]
    fn parses_single_text_block() {
        let out = parse_fragments(&json!({ "text": "Protein 5g" })).unwrap();
        assert_eq!(out, vec!["Protein 5g"]);
    }

    #[test]
    fn rejects_unknown_shapes() {
        assert!(parse_fragments(&json!({ "status": "ok" })).is_err());
        assert!(parse_fragments(&json!("text")).is_err());
    }

    #[tokio::test]
    async fn disabled_engine_reports_unavailable() {
        let err = DisabledOcrEngine.recognize(b"anything").await.unwrap_err();
        assert!(matches!(err, NutriError::OcrUnavailable));
    }

    #[test]
    fn http_engine_requires_http_endpoint() {
        let err = HttpOcrEngine::new("ocr.local:8866", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, NutriError::Config(_)));
    }

    #[tokio::test]
    async fn http_engine_rejects_non_images_before_sending() {
        let engine = HttpOcrEngine::new("http://127.0.0.1:9/ocr", Duration::from_secs(1)).unwrap();
        let err = engine.recognize(b"not an image").await.unwrap_err();
        assert!(err.is_input_error());
    }
}
