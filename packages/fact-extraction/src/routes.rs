//! Candidate sub-page discovery for a company site.
//!
//! Corporate sites put their news, IR and recruiting pages under a small
//! set of conventional paths. Probing those directly is cheaper and more
//! predictable than walking a sitemap.

use url::Url;

use crate::normalize::locale_prefix;

/// Section a candidate path is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Root,
    News,
    InvestorRelations,
    Sustainability,
    Corporate,
    Product,
    Recruit,
}

/// Conventional sub-paths, grouped by section.
pub const CANDIDATE_PATHS: &[(RouteKind, &[&str])] = &[
    (RouteKind::News, &["news", "press", "newsroom", "release", "topics"]),
    (RouteKind::InvestorRelations, &["ir", "investor", "investors"]),
    (RouteKind::Sustainability, &["sustainability", "csr"]),
    (RouteKind::Corporate, &["company", "corporate", "about", "profile"]),
    (RouteKind::Product, &["products", "service", "services", "solution", "business"]),
    (RouteKind::Recruit, &["recruit", "careers", "jobs"]),
];

/// A URL to fetch together with the section it was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCandidate {
    pub url: String,
    pub kind: RouteKind,
}

/// Produce the fixed candidate list for a base URL.
///
/// The base URL itself comes first. Every sub-path is emitted with and
/// without a trailing slash; when the base path starts with a locale prefix
/// (`/jp`) each sub-path is additionally emitted under that prefix.
/// Returns an empty list for URLs that cannot be parsed or have no host.
pub fn candidate_routes(base_url: &str) -> Vec<RouteCandidate> {
    let Ok(base) = Url::parse(base_url.trim()) else {
        return Vec::new();
    };
    if !base.has_host() {
        return Vec::new();
    }

    let origin = base.origin().ascii_serialization();
    let locale = locale_prefix(base.path()).map(str::to_string);

    let mut prefixes = vec![String::new()];
    if let Some(locale) = locale {
        prefixes.push(format!("/{}", locale));
    }

    let mut candidates = vec![RouteCandidate {
        url: base.to_string(),
        kind: RouteKind::Root,
    }];

    for (kind, paths) in CANDIDATE_PATHS {
        for path in *paths {
            for prefix in &prefixes {
                let bare = format!("{}{}/{}", origin, prefix, path);
                candidates.push(RouteCandidate {
                    url: format!("{}/", bare),
                    kind: *kind,
                });
                candidates.push(RouteCandidate { url: bare, kind: *kind });
            }
        }
    }

    candidates
}
