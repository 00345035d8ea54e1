//! Per-page extraction: build requests and validate extractor replies.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ExtractionError, Result};
use crate::html::visible_text;
use crate::pipeline::prompts::{format_fact_prompt, LONG_RANGE_MARKER};
use crate::traits::extractor::ExtractionRequest;
use crate::types::{fact::PageFacts, page::FetchedPage};

/// Longest accepted item, in characters.
pub const MAX_ITEM_CHARS: usize = 200;

/// Most items kept per category per page.
pub const MAX_ITEMS_PER_CATEGORY: usize = 10;

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").unwrap();
    static ref EXPLICIT_DATE: Regex = Regex::new(
        r"[0-9０-９]{4}\s*年|[0-9０-９]{4}[/.\-][0-9０-９]{1,2}|[0-9０-９]{1,2}\s*月|(令和|平成)\s*([0-9０-９]+|元)\s*年"
    )
    .unwrap();
    static ref MULTI_YEAR_PLAN: Regex = Regex::new(
        r"中期経営計画|中期計画|中長期|長期ビジョン|中期ビジョン|長期経営|ビジョン\s*20[0-9]{2}|[0-9０-９]{4}\s*年度?\s*(まで|に向け)|[0-9０-９]{1,2}\s*(か|ヶ|カ)年計画"
    )
    .unwrap();
}

/// Build the extractor request for a fetched page.
///
/// Returns `None` when the page has no visible text worth sending.
pub fn build_request(page: &FetchedPage, max_text_chars: usize) -> Option<ExtractionRequest> {
    if !page.is_textual() {
        return None;
    }
    let page_text = visible_text(&page.body, max_text_chars);
    if page_text.trim().is_empty() {
        return None;
    }

    Some(ExtractionRequest {
        prompt: format_fact_prompt(&page.final_url, &page_text),
        page_url: page.final_url.clone(),
        page_text,
    })
}

/// Parse and validate a raw extractor reply.
///
/// The reply must be a JSON object with all five arrays of strings. Items
/// are then cleaned: trimmed, empties and overlong items dropped, each
/// category capped, undated recent moves removed and multi-year plans
/// given the long-range marker.
pub fn parse_fact_response(raw: &str) -> Result<PageFacts> {
    let json = strip_code_fence(raw);
    if !json.trim_start().starts_with('{') {
        return Err(ExtractionError::InvalidShape {
            reason: "expected a JSON object".to_string(),
        });
    }

    let facts: PageFacts = serde_json::from_str(json)?;
    Ok(sanitize_page_facts(facts))
}

/// Apply the item-level rules to an already parsed reply.
pub fn sanitize_page_facts(facts: PageFacts) -> PageFacts {
    PageFacts {
        numbers: clean_items(facts.numbers),
        proper_nouns: clean_items(facts.proper_nouns),
        recent_moves: clean_items(
            facts
                .recent_moves
                .into_iter()
                .filter(|item| EXPLICIT_DATE.is_match(item))
                .collect(),
        ),
        hiring_trends: clean_items(facts.hiring_trends),
        company_direction: clean_items(facts.company_direction)
            .into_iter()
            .map(mark_long_range)
            .collect(),
    }
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for item in items {
        let item = item.trim();
        if item.is_empty() || item.chars().count() > MAX_ITEM_CHARS {
            continue;
        }
        if cleaned.iter().any(|existing| existing == item) {
            continue;
        }
        cleaned.push(item.to_string());
        if cleaned.len() >= MAX_ITEMS_PER_CATEGORY {
            break;
        }
    }
    cleaned
}

fn mark_long_range(item: String) -> String {
    if item.starts_with(LONG_RANGE_MARKER) || !MULTI_YEAR_PLAN.is_match(&item) {
        item
    } else {
        format!("{}{}", LONG_RANGE_MARKER, item)
    }
}

fn strip_code_fence(raw: &str) -> &str {
    CODE_FENCE
        .captures(raw)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
}
