//! Trait seams for external collaborators.

pub mod extractor;

pub use crate::fetch::PageFetcher;
pub use extractor::{ExtractionRequest, Extractor};
