use thiserror::Error;

/// Errors raised at the boundary around the extraction pipeline.
///
/// The pipeline itself never fails: empty text, missed patterns and unknown
/// demographics all resolve to valid results. Only input and collaborator
/// problems surface here.
#[derive(Debug, Error)]
pub enum NutriError {
    #[error("no image provided")]
    MissingImage,

    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("OCR engine error ({engine}): {message}")]
    Ocr { engine: String, message: String },

    #[error("no OCR engine configured")]
    OcrUnavailable,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NutriError {
    pub fn ocr(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ocr {
            engine: engine.into(),
            message: message.into(),
        }
    }

    /// Whether the caller sent something unusable, as opposed to a collaborator failing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingImage | Self::UnreadableImage(_) | Self::InvalidUpload(_))
    }
}
