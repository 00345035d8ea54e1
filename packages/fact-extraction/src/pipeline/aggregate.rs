//! Merge per-page facts and rank the pages they came from.

use std::collections::HashSet;

use url::Url;

use crate::normalize::{normalize_url, strip_locale_prefix};
use crate::types::fact::{Fact, FactCategory, InformationSource, PageFacts, SourceCategory};

/// Most sources returned to callers.
pub const MAX_SOURCES: usize = 8;

/// Sources flagged as primary citations.
pub const PRIMARY_SOURCES: usize = 3;

/// Path keywords per category, checked segment by segment.
const CATEGORY_KEYWORDS: &[(SourceCategory, &[&str])] = &[
    (
        SourceCategory::News,
        &["news", "newsroom", "press", "pressrelease", "release", "releases", "topics", "information", "media"],
    ),
    (
        SourceCategory::Ir,
        &["ir", "investor", "investors", "stock", "finance", "financial"],
    ),
    (
        SourceCategory::Recruit,
        &["recruit", "recruitment", "career", "careers", "jobs", "saiyo"],
    ),
    (
        SourceCategory::Corporate,
        &["company", "corporate", "about", "profile", "overview", "sustainability", "csr", "esg", "message", "philosophy"],
    ),
    (
        SourceCategory::Product,
        &["product", "products", "service", "services", "solution", "solutions", "business"],
    ),
];

/// Facts extracted from one page, with the page's attribution.
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub url: String,
    pub title: Option<String>,
    pub category: SourceCategory,
    pub facts: PageFacts,
}

impl PageExtraction {
    /// Attribute extracted facts to a page, classifying it by URL.
    pub fn new(url: impl Into<String>, title: Option<String>, facts: PageFacts) -> Self {
        let url = url.into();
        Self {
            category: classify_source(&url),
            url,
            title,
            facts,
        }
    }
}

/// Classify a page by the first path segment that matches a keyword.
///
/// Locale prefixes are skipped; the site root is `corporate`.
pub fn classify_source(url: &str) -> SourceCategory {
    let normalized = normalize_url(url);
    let path = match Url::parse(&normalized) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => normalized,
    };
    let path = strip_locale_prefix(&path).trim_matches('/').to_ascii_lowercase();

    if path.is_empty() {
        return SourceCategory::Corporate;
    }

    for segment in path.split('/') {
        let stem = segment.split('.').next().unwrap_or(segment);
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.contains(&stem) {
                return *category;
            }
        }
    }

    SourceCategory::Other
}

/// Flatten per-page facts into attributed `Fact`s.
///
/// No cross-page dedup: the same claim on two pages stays two facts.
/// Pages without a URL cannot be attributed and contribute nothing.
pub fn merge_facts(pages: &[PageExtraction]) -> Vec<Fact> {
    pages
        .iter()
        .filter(|page| !page.url.trim().is_empty())
        .flat_map(|page| {
            FactCategory::ALL.iter().flat_map(move |category| {
                page.facts.items(*category).iter().map(move |content| Fact {
                    content: content.clone(),
                    category: *category,
                    source_url: page.url.clone(),
                    source_title: page.title.clone(),
                    source_category: page.category,
                })
            })
        })
        .collect()
}

/// Collapse sources to one per normalized URL, keeping the first seen and
/// filling in a missing title from later duplicates.
pub fn dedup_sources(sources: Vec<InformationSource>) -> Vec<InformationSource> {
    let mut deduped: Vec<InformationSource> = Vec::new();
    let mut keys: Vec<String> = Vec::new();

    for source in sources {
        let key = normalize_url(&source.url);
        match keys.iter().position(|k| *k == key) {
            Some(idx) => {
                if deduped[idx].title.is_none() {
                    deduped[idx].title = source.title;
                }
            }
            None => {
                keys.push(key);
                deduped.push(source);
            }
        }
    }

    deduped
}

/// Rank sources for citation, keep the top `MAX_SOURCES` and flag the top
/// `PRIMARY_SOURCES` as primary.
///
/// Order: sources that produced a fact (only when any fact is attributed),
/// then category priority, then titled before untitled, then shorter URL.
pub fn prioritize_sources(
    sources: Vec<InformationSource>,
    facts: &[Fact],
) -> Vec<InformationSource> {
    let productive: HashSet<String> = facts
        .iter()
        .filter(|f| f.is_attributed())
        .map(|f| normalize_url(&f.source_url))
        .collect();
    let prefer_productive = !productive.is_empty();

    let mut ranked = dedup_sources(sources);
    ranked.sort_by_key(|source| {
        let unproductive =
            prefer_productive && !productive.contains(&normalize_url(&source.url));
        (
            unproductive,
            source.category.priority(),
            source.title.is_none(),
            source.url.len(),
        )
    });
    ranked.truncate(MAX_SOURCES);

    for (idx, source) in ranked.iter_mut().enumerate() {
        source.is_primary = idx < PRIMARY_SOURCES;
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_facts(numbers: &[&str], nouns: &[&str]) -> PageFacts {
        PageFacts {
            numbers: numbers.iter().map(|s| s.to_string()).collect(),
            proper_nouns: nouns.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_source() {
        assert_eq!(classify_source("https://example.com/"), SourceCategory::Corporate);
        assert_eq!(classify_source("https://example.com/jp/"), SourceCategory::Corporate);
        assert_eq!(classify_source("https://example.com/news/2024/01.html"), SourceCategory::News);
        assert_eq!(classify_source("https://example.com/jp/ir/library/"), SourceCategory::Ir);
        assert_eq!(classify_source("https://example.com/recruit/"), SourceCategory::Recruit);
        assert_eq!(classify_source("https://example.com/about.html"), SourceCategory::Corporate);
        assert_eq!(classify_source("https://example.com/products/a"), SourceCategory::Product);
        assert_eq!(classify_source("https://example.com/blog/post-1"), SourceCategory::Other);
    }

    #[test]
    fn test_first_matching_segment_wins() {
        // The IR section's news list is still IR
        assert_eq!(classify_source("https://example.com/ir/news/"), SourceCategory::Ir);
        assert_eq!(classify_source("https://example.com/company/news/"), SourceCategory::Corporate);
    }

    #[test]
    fn test_merge_keeps_duplicates_with_attribution() {
        let pages = vec![
            PageExtraction::new(
                "https://example.com/ir/",
                Some("IR情報".to_string()),
                page_facts(&["売上高1,200億円"], &["製品A"]),
            ),
            PageExtraction::new(
                "https://example.com/news/1.html",
                None,
                page_facts(&["売上高1,200億円"], &[]),
            ),
        ];

        let facts = merge_facts(&pages);
        assert_eq!(facts.len(), 3);

        let revenue: Vec<_> = facts.iter().filter(|f| f.content == "売上高1,200億円").collect();
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].source_url, "https://example.com/ir/");
        assert_eq!(revenue[0].source_category, SourceCategory::Ir);
        assert_eq!(revenue[0].source_title.as_deref(), Some("IR情報"));
        assert_eq!(revenue[1].source_url, "https://example.com/news/1.html");
        assert_eq!(revenue[1].source_category, SourceCategory::News);
        assert!(facts.iter().all(Fact::is_attributed));
    }

    #[test]
    fn test_merge_drops_unattributed_pages() {
        let pages = vec![PageExtraction::new("", None, page_facts(&["10店舗"], &[]))];
        assert!(merge_facts(&pages).is_empty());
    }

    #[test]
    fn test_prioritize_orders_by_category_then_title_then_length() {
        let sources = vec![
            InformationSource::new("https://example.com/products/", SourceCategory::Product),
            InformationSource::new("https://example.com/ir/long-page", SourceCategory::Ir),
            InformationSource::new("https://example.com/ir/", SourceCategory::Ir),
            InformationSource::new("https://example.com/news/", SourceCategory::News),
            InformationSource::new("https://example.com/ir/titled-but-long", SourceCategory::Ir)
                .with_title("IR"),
        ];

        let ranked = prioritize_sources(sources, &[]);
        let urls: Vec<_> = ranked.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/news/",
                "https://example.com/ir/titled-but-long",
                "https://example.com/ir/",
                "https://example.com/ir/long-page",
                "https://example.com/products/",
            ]
        );
        assert_eq!(ranked.iter().filter(|s| s.is_primary).count(), 3);
        assert!(ranked[0].is_primary && ranked[2].is_primary && !ranked[3].is_primary);
    }

    #[test]
    fn test_prioritize_dedups_and_truncates() {
        let mut sources = Vec::new();
        for i in 0..12 {
            sources.push(InformationSource::new(
                format!("https://example.com/news/{}", i),
                SourceCategory::News,
            ));
        }
        sources.push(InformationSource::new("https://example.com/news/0/", SourceCategory::News));
        sources.push(
            InformationSource::new("https://example.com/news/0/index.html", SourceCategory::News)
                .with_title("最新情報"),
        );

        let ranked = prioritize_sources(sources, &[]);
        assert_eq!(ranked.len(), MAX_SOURCES);

        let keys: HashSet<_> = ranked.iter().map(|s| normalize_url(&s.url)).collect();
        assert_eq!(keys.len(), ranked.len());

        // The duplicate's title was folded into the first occurrence
        assert_eq!(ranked[0].url, "https://example.com/news/0");
        assert_eq!(ranked[0].title.as_deref(), Some("最新情報"));
    }

    #[test]
    fn test_prioritize_prefers_sources_with_facts() {
        let sources = vec![
            InformationSource::new("https://example.com/news/", SourceCategory::News),
            InformationSource::new("https://example.com/recruit/", SourceCategory::Recruit),
        ];
        let facts = vec![Fact {
            content: "2025年度は新卒120名を採用予定".to_string(),
            category: FactCategory::HiringTrends,
            source_url: "https://example.com/recruit".to_string(),
            source_title: None,
            source_category: SourceCategory::Recruit,
        }];

        let ranked = prioritize_sources(sources, &facts);
        assert_eq!(ranked[0].url, "https://example.com/recruit/");
        assert_eq!(ranked[1].url, "https://example.com/news/");
    }
}
