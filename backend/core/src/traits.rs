use async_trait::async_trait;

use crate::error::NutriError;

/// External optical character recognition collaborator.
///
/// Implementations turn image bytes into recognized text fragments in reading
/// order. Pixel preprocessing, if any, is the engine's concern.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine name used in logs and error messages (e.g., "http").
    fn name(&self) -> &str;

    /// Recognize text in an encoded image.
    async fn recognize(&self, image: &[u8]) -> Result<Vec<String>, NutriError>;
}

/// Join OCR fragments into one raw text block: space-separated, in fragment order.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
