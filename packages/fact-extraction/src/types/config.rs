//! Crawl configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits and budgets for one fact-extraction crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Per-request timeout. Default: 12s.
    pub fetch_timeout: Duration,

    /// Maximum response body size in bytes. Default: 5 MiB.
    pub max_body_bytes: usize,

    /// Maximum number of pages sent to the extractor. Default: 8.
    pub max_pages: usize,

    /// Articles fetched per listing page. Default: 2.
    pub articles_per_listing: usize,

    /// Article links collected from one listing page. Default: 10.
    pub max_listing_candidates: usize,

    /// Character budget of the page text sent to the extractor. Default: 8000.
    pub max_text_chars: usize,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(12),
            max_body_bytes: 5 * 1024 * 1024,
            max_pages: 8,
            articles_per_listing: 2,
            max_listing_candidates: 10,
            max_text_chars: 8_000,
            user_agent: "Mozilla/5.0 (compatible; FactExtractionBot/1.0)".to_string(),
        }
    }
}

impl CrawlConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the body size cap.
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Set the page budget.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }

    /// Set the number of articles fetched per listing page.
    pub fn with_articles_per_listing(mut self, articles: usize) -> Self {
        self.articles_per_listing = articles;
        self
    }

    /// Set the extractor text budget.
    pub fn with_max_text_chars(mut self, chars: usize) -> Self {
        self.max_text_chars = chars;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Limits applied to each individual fetch.
    pub fn fetch_limits(&self) -> FetchLimits {
        FetchLimits {
            timeout: self.fetch_timeout,
            max_bytes: self.max_body_bytes,
        }
    }
}

/// Timeout and size cap for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub timeout: Duration,
    pub max_bytes: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        CrawlConfig::default().fetch_limits()
    }
}
