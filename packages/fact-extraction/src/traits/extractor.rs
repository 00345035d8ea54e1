//! Extractor trait for the per-page fact extraction call.

use async_trait::async_trait;

use crate::error::Result;

/// One page worth of input for the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// URL of the page, for context and attribution
    pub page_url: String,

    /// Visible text of the page, already truncated
    pub page_text: String,

    /// Fully rendered prompt
    pub prompt: String,
}

/// External text-generation call that turns page text into facts.
///
/// Implementations return the raw reply; the pipeline parses and validates
/// it so every provider gets the same shape checks.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Run the extraction for one page and return the raw JSON reply.
    async fn extract(&self, request: &ExtractionRequest) -> Result<String>;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for std::sync::Arc<T> {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        (**self).extract(request).await
    }
}
