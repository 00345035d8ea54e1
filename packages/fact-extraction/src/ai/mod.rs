//! Reference extractor implementations.
//!
//! Users can use these directly or implement `Extractor` themselves.

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAI;
