//! Company Site Fact Extraction Library
//!
//! Crawls a bounded set of sub-pages of a company site, follows news and IR
//! listing pages to their latest articles, extracts short factual claims
//! per page through an external extractor, and merges them into
//! source-attributed facts plus a ranked list of citable sources.
//!
//! # Design Philosophy
//!
//! - Every fetch is SSRF-checked before any connection is made
//! - Partial failure is expected: a failed page is just unavailable
//! - Facts are never deduplicated across pages, so attribution stays exact
//! - The extractor is a collaborator behind a trait, never a global
//!
//! # Usage
//!
//! ```rust,ignore
//! use fact_extraction::{CrawlConfig, FactCrawler, HttpFetcher};
//! use fact_extraction::ai::OpenAI;
//!
//! let config = CrawlConfig::default();
//! let fetcher = HttpFetcher::new(&config.user_agent)?;
//! let crawler = FactCrawler::new(fetcher, OpenAI::from_env()?).with_config(config);
//!
//! if let Some(result) = crawler.extract_facts("https://example.co.jp/").await {
//!     for fact in &result.facts {
//!         println!("{} ({})", fact.content, fact.source_url);
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! - [`fetch`] - `PageFetcher` trait and the SSRF-hardened `HttpFetcher`
//! - [`security`] - URL validation and SSRF protection
//! - [`normalize`] - URL canonicalization used as the dedup key
//! - [`routes`] - candidate sub-route generation
//! - [`listing`] - listing-page detection and article link extraction
//! - [`html`] - visible text, titles and anchors from raw HTML
//! - [`pipeline`] - crawl orchestration, extraction and aggregation
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod fetch;
pub mod html;
pub mod listing;
pub mod normalize;
pub mod pipeline;
pub mod routes;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractionError, FetchError, FetchResult, Result, SecurityError, SecurityResult};
pub use fetch::{HttpFetcher, PageFetcher};
pub use normalize::normalize_url;
pub use pipeline::{format_fact_prompt, FactCrawler, LONG_RANGE_MARKER};
pub use routes::{candidate_routes, RouteCandidate, RouteKind};
pub use security::UrlValidator;
pub use traits::{ExtractionRequest, Extractor};
pub use types::{
    config::{CrawlConfig, FetchLimits},
    fact::{Fact, FactCategory, FactExtractionResult, InformationSource, PageFacts, SourceCategory},
    page::FetchedPage,
};

// Re-export testing utilities
pub use testing::{MockExtractor, MockFetcher};
