//! Matching draft text against crawled facts.

use fact_extraction::{Fact, FactCategory, LONG_RANGE_MARKER};
use lazy_static::lazy_static;
use regex::Regex;

/// Facts up to this many characters are matched whole.
pub const SHORT_FACT_CHARS: usize = 24;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"[0-9０-９]+(?:[,，.．][0-9０-９]+)*").unwrap();
    static ref QUOTED: Regex = Regex::new(r"「([^」]+)」").unwrap();
}

/// Substrings whose presence in a draft counts as quoting `fact`.
///
/// The whole fact when it is short, every figure of two or more
/// characters and every 「」-quoted span.
pub fn fact_keys(fact: &Fact) -> Vec<String> {
    let content = fact.content.trim();
    let content = content.strip_prefix(LONG_RANGE_MARKER).unwrap_or(content).trim();
    let mut keys = Vec::new();

    if !content.is_empty() && content.chars().count() <= SHORT_FACT_CHARS {
        keys.push(content.to_string());
    }
    for number in NUMBER.find_iter(content) {
        if number.as_str().chars().count() >= 2 {
            keys.push(number.as_str().to_string());
        }
    }
    for quoted in QUOTED.captures_iter(content) {
        keys.push(quoted[1].to_string());
    }

    keys.dedup();
    keys
}

/// True when `text` quotes any of `facts`.
pub fn quotes_any_fact(text: &str, facts: &[Fact]) -> bool {
    facts
        .iter()
        .flat_map(fact_keys)
        .any(|key| text.contains(key.as_str()))
}

/// True when any fact is a figure.
pub fn has_numbers(facts: &[Fact]) -> bool {
    facts.iter().any(|f| f.category == FactCategory::Numbers)
}

/// True when any fact is a proper noun.
pub fn has_proper_nouns(facts: &[Fact]) -> bool {
    facts.iter().any(|f| f.category == FactCategory::ProperNouns)
}

#[cfg(test)]
pub(crate) fn fact(content: &str, category: FactCategory) -> Fact {
    Fact {
        content: content.to_string(),
        category,
        source_url: "https://example.co.jp/news/2024/0401.html".to_string(),
        source_title: Some("お知らせ".to_string()),
        source_category: fact_extraction::SourceCategory::News,
    }
}
