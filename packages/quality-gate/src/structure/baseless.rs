//! Figures nobody supplied and diagnoses nobody asked for.

use fact_extraction::Fact;
use serde::{Deserialize, Serialize};

use crate::lexicon::{CTA_MINUTES, DECISIVE_DIAGNOSES, NUMERIC_TOKEN};
use crate::rules::{capped_penalty, run_rules};

const UNTRACED_NUMBER_PENALTY: u32 = 5;
const UNTRACED_NUMBER_CAP: u32 = 20;
const DIAGNOSIS_CAP: u32 = 16;

/// Issues found by `detect_baseless_assertions` and their summed penalty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BaselessAssertionResult {
    pub issues: Vec<String>,
    pub penalty: u32,
}

/// Flag figures that appear in no fact or proof point, and decisive
/// diagnosis templates.
///
/// Meeting lengths (10, 15, 20 or 30 minutes) are never flagged, even when
/// the same figure would otherwise be an invented claim.
pub fn detect_baseless_assertions(
    body: &str,
    facts: &[Fact],
    proof_points: &[String],
) -> BaselessAssertionResult {
    let evidence: Vec<String> = facts
        .iter()
        .map(|f| canonical_digits(&f.content))
        .chain(proof_points.iter().map(|p| canonical_digits(p)))
        .collect();

    let mut issues = Vec::new();
    let mut untraced: Vec<String> = Vec::new();
    for number in NUMERIC_TOKEN.find_iter(body) {
        let digits = canonical_digits(number.as_str());
        if CTA_MINUTES.is_match(&digits) && body[number.end()..].starts_with('分') {
            continue;
        }
        if untraced.contains(&digits) || evidence.iter().any(|e| e.contains(&digits)) {
            continue;
        }
        issues.push(format!("根拠の確認できない数値: {}", number.as_str()));
        untraced.push(digits);
    }
    let number_penalty =
        (untraced.len() as u32 * UNTRACED_NUMBER_PENALTY).min(UNTRACED_NUMBER_CAP);

    let diagnoses = run_rules(&DECISIVE_DIAGNOSES, body);
    for hit in &diagnoses {
        issues.push(format!("断定的な診断表現: {}", hit.rule.label));
    }
    let diagnosis_penalty = capped_penalty(&diagnoses, DIAGNOSIS_CAP);

    BaselessAssertionResult {
        issues,
        penalty: number_penalty + diagnosis_penalty,
    }
}

/// Half-width digits with separators removed, so `１，２００` matches `1200`.
fn canonical_digits(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
            ',' | '，' => None,
            '.' | '．' => Some('.'),
            _ => Some(c),
        })
        .collect()
}
