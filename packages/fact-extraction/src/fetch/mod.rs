//! Page fetching behind a trait so the crawler can run against fakes.
//!
//! - `HttpFetcher` - SSRF-hardened HTTP GET with timeout and body caps
//! - `MockFetcher` (in `testing`) - scripted pages and failures

mod http;

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::{config::FetchLimits, page::FetchedPage};

pub use http::HttpFetcher;

/// Fetches a single page.
///
/// Failures are always returned, never swallowed; the caller decides that a
/// failed page is simply unavailable.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` within the given timeout and size cap.
    async fn fetch(&self, url: &str, limits: &FetchLimits) -> FetchResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str, limits: &FetchLimits) -> FetchResult<FetchedPage> {
        (**self).fetch(url, limits).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
