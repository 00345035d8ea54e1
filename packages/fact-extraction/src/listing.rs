//! Listing-page detection and article link extraction.
//!
//! News and IR index pages are mostly links; the facts live in the
//! articles they point to. Listings are assumed to be in reverse
//! chronological order, so the first links found are the most recent.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::html::anchor_hrefs;
use crate::normalize::{locale_prefix, normalize_url, strip_locale_prefix};

/// Path suffixes that mark a page as a listing of articles.
pub const LISTING_SUFFIXES: &[&str] = &[
    "/news",
    "/newsroom",
    "/press",
    "/pressrelease",
    "/press-release",
    "/release",
    "/releases",
    "/topics",
    "/information",
    "/info",
    "/ir",
    "/ir/news",
    "/ir/library",
    "/ir/release",
    "/news/release",
];

lazy_static! {
    static ref IGNORED_HREF: Vec<Regex> = [
        r"^#",
        r"(?i)^(javascript|mailto|tel|data):",
        r"(?i)\.(pdf|jpe?g|png|gif|svg|webp|zip|docx?|xlsx?|pptx?|csv|mp3|mp4|mov)(\?.*)?$",
        r"(?i)[/?&](page|paged|p)[=/]\d+",
        r"(?i)/page\d+(\.html?)?/?$",
        r"(?i)/(tag|tags|category|categories|archive|archives)(/|$)",
        r"(?i)/(19|20)\d{2}/?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// True when the URL path ends in a known listing suffix.
///
/// Locale prefixes are ignored, so `/jp/news/` is a listing.
pub fn is_listing_page(url: &str) -> bool {
    let Ok(parsed) = Url::parse(&normalize_url(url)) else {
        return false;
    };
    let path = strip_locale_prefix(parsed.path()).trim_end_matches('/');
    let path = path.to_ascii_lowercase();
    LISTING_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Extract up to `limit` article URLs from a listing page, in document order.
///
/// Links are kept only when they are same-origin, strictly deeper than the
/// listing path, not ignored (fragments, scripts, files, pagination,
/// taxonomy and archive pages, other locales) and not already seen.
pub fn extract_article_links(listing_url: &str, html: &str, limit: usize) -> Vec<String> {
    let Ok(listing) = Url::parse(&normalize_url(listing_url)) else {
        return Vec::new();
    };

    // Treat the listing path as a directory so relative hrefs resolve under it
    let mut base = listing.clone();
    base.set_path(&format!("{}/", listing.path().trim_end_matches('/')));

    let listing_path = listing.path().trim_end_matches('/').to_string();
    let listing_locale = locale_prefix(&listing_path).map(str::to_ascii_lowercase);
    let listing_key = normalize_url(listing.as_str());

    let mut seen: HashSet<String> = HashSet::new();
    let mut articles = Vec::new();

    for href in anchor_hrefs(html) {
        if articles.len() >= limit {
            break;
        }
        if IGNORED_HREF.iter().any(|re| re.is_match(&href)) {
            continue;
        }

        let Ok(resolved) = base.join(&href) else {
            continue;
        };
        if resolved.origin() != listing.origin() {
            continue;
        }
        if IGNORED_HREF.iter().any(|re| re.is_match(resolved.path())) {
            continue;
        }

        let link_locale = locale_prefix(resolved.path()).map(str::to_ascii_lowercase);
        if link_locale != listing_locale {
            continue;
        }

        let key = normalize_url(resolved.as_str());
        if key == listing_key || !is_deeper(&key, &listing_key) {
            continue;
        }

        if seen.insert(key.clone()) {
            articles.push(key);
        }
    }

    articles
}

fn is_deeper(candidate: &str, listing: &str) -> bool {
    candidate.len() > listing.len() + 1
        && candidate.starts_with(listing)
        && candidate[listing.len()..].starts_with('/')
}
