//! Source attribution checks for crawled facts.

use fact_extraction::Fact;

use crate::facts::quotes_any_fact;

/// Flag unattributed facts, and a draft that uses facts with no citations.
///
/// Only applies when a target company was resolved and facts exist.
pub fn validate_source_attribution(
    body: &str,
    facts: &[Fact],
    citations: &[String],
    has_target: bool,
) -> Vec<String> {
    if !has_target || facts.is_empty() {
        return Vec::new();
    }

    let mut issues: Vec<String> = facts
        .iter()
        .filter(|f| !f.is_attributed())
        .map(|f| format!("出典URLのない事実: {}", f.content))
        .collect();

    if citations.iter().all(|c| c.trim().is_empty()) && quotes_any_fact(body, facts) {
        issues.push("事実を引用していますが出典リストが空です".to_string());
    }

    issues
}
