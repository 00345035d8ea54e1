//! Typed errors for draft generation.
//!
//! Validation and scoring never fail; only the external drafter can.

use thiserror::Error;

/// Errors raised by a single drafter call.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The external drafter call failed
    #[error("drafter error: {0}")]
    Drafter(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The drafter returned nothing but whitespace
    #[error("drafter returned an empty draft")]
    EmptyDraft,
}

/// Errors surfaced to callers of the retry loop.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Every attempt failed and no draft was produced
    #[error("generation failed after {attempts} attempt(s): {source}")]
    Failed {
        attempts: usize,
        #[source]
        source: DraftError,
    },
}

/// Result type alias for drafter calls.
pub type DraftResult<T> = std::result::Result<T, DraftError>;

/// Result type alias for generation.
pub type Result<T> = std::result::Result<T, GenerationError>;
