//! Testing utilities including mock implementations.
//!
//! These are useful for testing crawls without making real HTTP or
//! extractor calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractionError, FetchError, FetchResult, Result};
use crate::normalize::normalize_url;
use crate::traits::{ExtractionRequest, Extractor, PageFetcher};
use crate::types::{config::FetchLimits, page::FetchedPage};

/// Scripted failure for a mock fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Timeout,
    Status(u16),
    TooLarge,
}

impl MockFailure {
    fn to_error(self, url: &str, limits: &FetchLimits) -> FetchError {
        match self {
            MockFailure::Timeout => FetchError::Timeout {
                url: url.to_string(),
            },
            MockFailure::Status(status) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            MockFailure::TooLarge => FetchError::TooLarge {
                url: url.to_string(),
                limit: limits.max_bytes,
                actual: limits.max_bytes as u64 + 1,
            },
        }
    }
}

/// A mock fetcher for testing.
///
/// Pages are keyed by normalized URL, so `/news` and `/news/` both hit a
/// page registered as either. Unknown URLs fail with the default failure
/// (404 unless changed).
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    failures: Arc<RwLock<HashMap<String, MockFailure>>>,
    default_failure: MockFailure,
    calls: Arc<RwLock<Vec<String>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self {
            pages: Arc::default(),
            failures: Arc::default(),
            default_failure: MockFailure::Status(404),
            calls: Arc::default(),
        }
    }
}

impl MockFetcher {
    /// Create a new mock fetcher with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve an HTML page at `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), html);
        self.pages.write().unwrap().insert(normalize_url(&url), page);
        self
    }

    /// Serve a fully specified page (redirects, content type) at `url`.
    pub fn with_fetched_page(self, url: impl Into<String>, page: FetchedPage) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(normalize_url(&url.into()), page);
        self
    }

    /// Fail fetches of `url`.
    pub fn with_failure(self, url: impl Into<String>, failure: MockFailure) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(normalize_url(&url.into()), failure);
        self
    }

    /// Failure returned for URLs with no scripted page.
    pub fn with_default_failure(mut self, failure: MockFailure) -> Self {
        self.default_failure = failure;
        self
    }

    /// URLs requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, limits: &FetchLimits) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        let key = normalize_url(url);
        if let Some(failure) = self.failures.read().unwrap().get(&key) {
            return Err(failure.to_error(url, limits));
        }

        match self.pages.read().unwrap().get(&key) {
            Some(page) => {
                let mut page = page.clone();
                page.url = url.to_string();
                Ok(page)
            }
            None => Err(self.default_failure.to_error(url, limits)),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock extractor for testing.
///
/// Replies are keyed by normalized page URL. Pages without a scripted reply
/// get the default reply, which is an empty fact object unless changed.
pub struct MockExtractor {
    replies: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, String>>>,
    default_reply: String,
    calls: Arc<RwLock<Vec<ExtractionRequest>>>,
}

/// Reply with every category present and empty.
pub const EMPTY_FACTS_JSON: &str = r#"{"numbers":[],"properNouns":[],"recentMoves":[],"hiringTrends":[],"companyDirection":[]}"#;

impl Default for MockExtractor {
    fn default() -> Self {
        Self {
            replies: Arc::default(),
            failures: Arc::default(),
            default_reply: EMPTY_FACTS_JSON.to_string(),
            calls: Arc::default(),
        }
    }
}

impl MockExtractor {
    /// Create a new mock extractor that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `raw` for the page at `url`.
    pub fn with_reply(self, url: impl Into<String>, raw: impl Into<String>) -> Self {
        self.replies
            .write()
            .unwrap()
            .insert(normalize_url(&url.into()), raw.into());
        self
    }

    /// Fail the extraction of the page at `url`.
    pub fn with_failure(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(normalize_url(&url.into()), message.into());
        self
    }

    /// Reply used for pages without a scripted reply.
    pub fn with_default_reply(mut self, raw: impl Into<String>) -> Self {
        self.default_reply = raw.into();
        self
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<ExtractionRequest> {
        self.calls.read().unwrap().clone()
    }

    /// Page URLs extracted so far, in call order.
    pub fn extracted_urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|r| r.page_url).collect()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        self.calls.write().unwrap().push(request.clone());

        let key = normalize_url(&request.page_url);
        if let Some(message) = self.failures.read().unwrap().get(&key) {
            return Err(ExtractionError::Extractor(message.clone().into()));
        }

        Ok(self
            .replies
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone()))
    }
}

/// Build an extractor reply with the given numbers and proper nouns.
pub fn facts_json(numbers: &[&str], proper_nouns: &[&str]) -> String {
    serde_json::json!({
        "numbers": numbers,
        "properNouns": proper_nouns,
        "recentMoves": [],
        "hiringTrends": [],
        "companyDirection": [],
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fetcher_serves_both_slash_variants() {
        let fetcher = MockFetcher::new().with_page("https://example.com/news/", "<p>news</p>");
        let limits = FetchLimits::default();

        let a = fetcher.fetch("https://example.com/news", &limits).await.unwrap();
        let b = fetcher.fetch("https://example.com/news/", &limits).await.unwrap();
        assert_eq!(a.url, "https://example.com/news");
        assert_eq!(b.url, "https://example.com/news/");
        assert_eq!(a.normalized_url(), b.normalized_url());
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_fetcher_failures() {
        let fetcher = MockFetcher::new()
            .with_failure("https://example.com/ir/", MockFailure::TooLarge)
            .with_default_failure(MockFailure::Timeout);
        let limits = FetchLimits::default();

        assert!(matches!(
            fetcher.fetch("https://example.com/ir", &limits).await,
            Err(FetchError::TooLarge { .. })
        ));
        assert!(matches!(
            fetcher.fetch("https://example.com/other", &limits).await,
            Err(FetchError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_mock_extractor_replies() {
        let extractor = MockExtractor::new()
            .with_reply("https://example.com/ir/", facts_json(&["売上高100億円"], &[]))
            .with_failure("https://example.com/bad", "rate limited");

        let request = |url: &str| ExtractionRequest {
            page_url: url.to_string(),
            page_text: "text".to_string(),
            prompt: "prompt".to_string(),
        };

        let reply = extractor.extract(&request("https://example.com/ir")).await.unwrap();
        assert!(reply.contains("売上高100億円"));
        assert_eq!(
            extractor.extract(&request("https://example.com/")).await.unwrap(),
            EMPTY_FACTS_JSON
        );
        assert!(extractor.extract(&request("https://example.com/bad")).await.is_err());
        assert_eq!(extractor.extracted_urls().len(), 3);
    }
}
