//! Facts, sources and the crawl result handed to callers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of claim a fact makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactCategory {
    /// Figures: revenue, headcount, store count, growth rates
    Numbers,
    /// Product, brand, facility and partner names
    ProperNouns,
    /// Dated recent events (launches, openings, alliances)
    RecentMoves,
    /// Hiring volume, open roles, recruiting focus
    HiringTrends,
    /// Stated strategy and direction
    CompanyDirection,
}

impl FactCategory {
    /// All categories in the order the extractor returns them.
    pub const ALL: [FactCategory; 5] = [
        FactCategory::Numbers,
        FactCategory::ProperNouns,
        FactCategory::RecentMoves,
        FactCategory::HiringTrends,
        FactCategory::CompanyDirection,
    ];

    /// Wire name, matching the extractor's JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactCategory::Numbers => "numbers",
            FactCategory::ProperNouns => "properNouns",
            FactCategory::RecentMoves => "recentMoves",
            FactCategory::HiringTrends => "hiringTrends",
            FactCategory::CompanyDirection => "companyDirection",
        }
    }
}

/// Section of a site a source page belongs to.
///
/// Declaration order is citation priority: news first, other last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    News,
    Ir,
    Recruit,
    Corporate,
    Product,
    #[default]
    Other,
}

impl SourceCategory {
    /// Sort key: lower is cited first.
    pub fn priority(&self) -> u8 {
        *self as u8
    }
}

/// A short factual claim attributed to exactly one page.
///
/// The same claim found on two pages yields two facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fact {
    pub content: String,
    pub category: FactCategory,
    pub source_url: String,
    pub source_title: Option<String>,
    pub source_category: SourceCategory,
}

impl Fact {
    /// True when the fact can be traced back to a page.
    pub fn is_attributed(&self) -> bool {
        !self.source_url.trim().is_empty()
    }
}

/// A distinct visited page, classified and ranked for citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationSource {
    pub url: String,
    pub title: Option<String>,
    pub category: SourceCategory,
    /// Set after prioritization for the top-ranked sources only.
    pub is_primary: bool,
}

impl InformationSource {
    /// Create an unranked source.
    pub fn new(url: impl Into<String>, category: SourceCategory) -> Self {
        Self {
            url: url.into(),
            title: None,
            category,
            is_primary: false,
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// What a crawl hands back to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactExtractionResult {
    pub facts: Vec<Fact>,
    pub sources: Vec<InformationSource>,
}

impl FactExtractionResult {
    /// Facts of one category, in merge order.
    pub fn facts_in(&self, category: FactCategory) -> impl Iterator<Item = &Fact> {
        self.facts.iter().filter(move |f| f.category == category)
    }

    /// Sources flagged as primary citations.
    pub fn primary_sources(&self) -> impl Iterator<Item = &InformationSource> {
        self.sources.iter().filter(|s| s.is_primary)
    }
}

/// Structured reply of the extractor for a single page.
///
/// Every key is required; a reply missing one is rejected as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    /// Figures with their units
    pub numbers: Vec<String>,
    /// Product, service, facility and partner names
    pub proper_nouns: Vec<String>,
    /// Recent events; each item carries an explicit date
    pub recent_moves: Vec<String>,
    /// Hiring activity
    pub hiring_trends: Vec<String>,
    /// Strategy; multi-year plans carry the long-range marker
    pub company_direction: Vec<String>,
}

impl PageFacts {
    /// Items of one category.
    pub fn items(&self, category: FactCategory) -> &[String] {
        match category {
            FactCategory::Numbers => &self.numbers,
            FactCategory::ProperNouns => &self.proper_nouns,
            FactCategory::RecentMoves => &self.recent_moves,
            FactCategory::HiringTrends => &self.hiring_trends,
            FactCategory::CompanyDirection => &self.company_direction,
        }
    }

    /// Total number of items across all categories.
    pub fn len(&self) -> usize {
        FactCategory::ALL.iter().map(|c| self.items(*c).len()).sum()
    }

    /// True when no category has any item.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
