//! Drafter trait for the external letter-generation call.

use async_trait::async_trait;

use crate::error::DraftResult;

/// One generation request handed to the drafter.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRequest {
    /// Caller prompt, with correction instructions appended on retries
    pub prompt: String,

    /// Sampling temperature for this attempt
    pub temperature: f32,

    /// Zero-based attempt number
    pub attempt_index: usize,
}

/// External text-generation call that drafts a letter body.
///
/// Invoked at most `max_attempts` times per generation; implementations
/// should honour `temperature`.
#[async_trait]
pub trait Drafter: Send + Sync {
    /// Draft a letter body for `request`.
    async fn draft(&self, request: &DraftRequest) -> DraftResult<String>;
}

#[async_trait]
impl<T: Drafter + ?Sized> Drafter for std::sync::Arc<T> {
    async fn draft(&self, request: &DraftRequest) -> DraftResult<String> {
        (**self).draft(request).await
    }
}
