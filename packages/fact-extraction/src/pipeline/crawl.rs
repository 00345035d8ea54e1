//! Crawl entrypoint: routes → fetch → listing articles → extract → merge.
//!
//! Every fan-out is settle-all: each branch yields an explicit `Ok` or `Err`
//! and only `Ok` values flow into the next stage. No branch shares mutable
//! state; merging happens after every branch of a wave has settled.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::error::{FetchError, Result};
use crate::fetch::PageFetcher;
use crate::listing::{extract_article_links, is_listing_page};
use crate::normalize::normalize_url;
use crate::pipeline::aggregate::{classify_source, merge_facts, prioritize_sources, PageExtraction};
use crate::pipeline::extract::{build_request, parse_fact_response};
use crate::routes::candidate_routes;
use crate::traits::extractor::Extractor;
use crate::types::{
    config::CrawlConfig,
    fact::{FactExtractionResult, InformationSource, PageFacts},
    page::FetchedPage,
};

/// Drives fact extraction for one company site.
///
/// # Example
///
/// ```rust,ignore
/// use fact_extraction::{CrawlConfig, FactCrawler, HttpFetcher};
///
/// let config = CrawlConfig::default();
/// let fetcher = HttpFetcher::new(&config.user_agent)?;
/// let crawler = FactCrawler::new(fetcher, extractor).with_config(config);
///
/// match crawler.extract_facts("https://example.co.jp/").await {
///     Some(result) => println!("{} facts", result.facts.len()),
///     None => println!("no usable page"),
/// }
/// ```
pub struct FactCrawler<F: PageFetcher, E: Extractor> {
    fetcher: F,
    extractor: E,
    config: CrawlConfig,
}

/// Outcome of one fetch in a wave.
type Settled = (String, std::result::Result<FetchedPage, FetchError>);

impl<F: PageFetcher, E: Extractor> FactCrawler<F, E> {
    /// Create a crawler with the default configuration.
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            config: CrawlConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl a company site and return attributed facts plus ranked sources.
    ///
    /// Returns `None` when no page could be fetched or no page yielded a
    /// fact. Individual fetch and extraction failures never fail the crawl.
    pub async fn extract_facts(&self, base_url: &str) -> Option<FactExtractionResult> {
        let candidates = candidate_routes(base_url);
        if candidates.is_empty() {
            warn!(base_url = %base_url, "Base URL is not crawlable");
            return None;
        }

        info!(
            base_url = %base_url,
            candidates = candidates.len(),
            fetcher = self.fetcher.name(),
            "Fact extraction crawl starting"
        );

        // Wave 1: every candidate route
        let urls: Vec<String> = candidates.into_iter().map(|c| c.url).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let route_pages = unique_pages(self.fetch_all(&urls).await, &mut seen);

        if route_pages.is_empty() {
            info!(base_url = %base_url, "No candidate route could be fetched");
            return None;
        }

        let (listings, content_pages): (Vec<FetchedPage>, Vec<FetchedPage>) = route_pages
            .into_iter()
            .partition(|page| is_listing_page(&page.final_url));

        // Wave 2: the most recent articles of each listing page
        let article_urls = self.article_candidates(&listings, &seen);
        let articles = if article_urls.is_empty() {
            Vec::new()
        } else {
            unique_pages(self.fetch_all(&article_urls).await, &mut seen)
        };

        debug!(
            listings = listings.len(),
            content_pages = content_pages.len(),
            articles = articles.len(),
            "Fetch waves settled"
        );

        // Articles first, then the other pages, within the page budget
        let extraction_pages: Vec<&FetchedPage> = articles
            .iter()
            .chain(content_pages.iter())
            .take(self.config.max_pages)
            .collect();

        // Wave 3: per-page extraction
        let extractions = join_all(
            extraction_pages
                .iter()
                .map(|page| async move { (*page, self.extract_page(page).await) }),
        )
        .await;

        let mut page_extractions = Vec::new();
        for (page, outcome) in extractions {
            match outcome {
                Ok(facts) if !facts.is_empty() => {
                    page_extractions.push(PageExtraction::new(
                        page.final_url.clone(),
                        page.title(),
                        facts,
                    ));
                }
                Ok(_) => debug!(url = %page.final_url, "Page yielded no facts"),
                Err(e) => warn!(url = %page.final_url, error = %e, "Skipping page"),
            }
        }

        let facts = merge_facts(&page_extractions);
        if facts.is_empty() {
            info!(base_url = %base_url, "No page yielded facts");
            return None;
        }

        let sources: Vec<InformationSource> = listings
            .iter()
            .chain(content_pages.iter())
            .chain(articles.iter())
            .map(|page| {
                let source =
                    InformationSource::new(page.final_url.clone(), classify_source(&page.final_url));
                match page.title() {
                    Some(title) => source.with_title(title),
                    None => source,
                }
            })
            .collect();
        let sources = prioritize_sources(sources, &facts);

        info!(
            base_url = %base_url,
            facts = facts.len(),
            sources = sources.len(),
            pages_extracted = page_extractions.len(),
            "Fact extraction crawl complete"
        );

        Some(FactExtractionResult { facts, sources })
    }

    /// Fetch all URLs concurrently and settle every outcome.
    async fn fetch_all(&self, urls: &[String]) -> Vec<Settled> {
        let limits = self.config.fetch_limits();
        join_all(urls.iter().map(|url| {
            async move {
                let outcome = self.fetcher.fetch(url, &limits).await;
                if let Err(e) = &outcome {
                    debug!(url = %url, error = %e, "Page unavailable");
                }
                (url.clone(), outcome)
            }
        }))
        .await
    }

    /// Pick the first `articles_per_listing` unseen article links of each
    /// listing page, capped by the page budget.
    fn article_candidates(&self, listings: &[FetchedPage], seen: &HashSet<String>) -> Vec<String> {
        let mut picked: Vec<String> = Vec::new();
        for listing in listings {
            let links = extract_article_links(
                &listing.final_url,
                &listing.body,
                self.config.max_listing_candidates,
            );
            debug!(url = %listing.final_url, links = links.len(), "Listing page links");

            let fresh: Vec<String> = links
                .into_iter()
                .filter(|link| !seen.contains(&normalize_url(link)) && !picked.contains(link))
                .take(self.config.articles_per_listing)
                .collect();
            picked.extend(fresh);
        }
        picked.truncate(self.config.max_pages);
        picked
    }

    async fn extract_page(&self, page: &FetchedPage) -> Result<PageFacts> {
        let Some(request) = build_request(page, self.config.max_text_chars) else {
            return Ok(PageFacts::default());
        };
        let raw = self.extractor.extract(&request).await?;
        parse_fact_response(&raw)
    }
}

/// Keep successful, textual fetches whose normalized URL was not seen yet.
fn unique_pages(settled: Vec<Settled>, seen: &mut HashSet<String>) -> Vec<FetchedPage> {
    settled
        .into_iter()
        .filter_map(|(_, outcome)| outcome.ok())
        .filter(|page| page.is_textual())
        .filter(|page| seen.insert(page.normalized_url()))
        .collect()
}
