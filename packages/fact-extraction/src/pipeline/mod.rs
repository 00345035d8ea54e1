//! Fact extraction pipeline.
//!
//! - `crawl` - the `FactCrawler` entrypoint and its three concurrent waves
//! - `extract` - extractor request building and reply validation
//! - `aggregate` - fact merging, source classification and ranking
//! - `prompts` - the extraction prompt

pub mod aggregate;
pub mod crawl;
pub mod extract;
pub mod prompts;

pub use aggregate::{
    classify_source, dedup_sources, merge_facts, prioritize_sources, PageExtraction, MAX_SOURCES,
    PRIMARY_SOURCES,
};
pub use crawl::FactCrawler;
pub use extract::{build_request, parse_fact_response, sanitize_page_facts};
pub use prompts::{format_fact_prompt, LONG_RANGE_MARKER};
