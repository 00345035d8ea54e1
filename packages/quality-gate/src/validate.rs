//! Deterministic validation of a drafted letter.
//!
//! Every rule runs; violations accumulate as reasons and nothing short
//! circuits.

use tracing::debug;

use crate::lexicon::{
    COMPLETE_FORBIDDEN_VOCAB, CONFIRMATION_MARKER, CONSULTING_FORBIDDEN_VOCAB,
    EXHIBITOR_CONTRADICTIONS, FORBIDDEN_PATTERNS, FORBIDDEN_PHRASES, NEWS_ASSERTIONS,
    NUMERIC_CLAIM, TELEGRAPHIC_ENDING, VISITOR_CONTRADICTIONS,
};
use crate::rules::{labels, run_rules};
use crate::types::{EventPosition, Mode, QualityResult, ValidateOptions};
use crate::window::char_len;

/// Sentences in telegraphic style tolerated before the register is flagged.
const MAX_TELEGRAPHIC_SENTENCES: usize = 1;

/// Validate `body` against every rule for `options.mode`.
///
/// `proof_points` are the caller's pre-supplied evidence; when any is given
/// figures are treated as supported even if `has_proof_points` was not set.
pub fn validate(body: &str, proof_points: &[String], options: &ValidateOptions) -> QualityResult {
    let mut reasons = Vec::new();

    let length = char_len(body);
    if length < options.min_chars {
        reasons.push(format!(
            "文字数が不足しています（{}文字 / 最低{}文字）",
            length, options.min_chars
        ));
    }
    if length > options.max_chars {
        reasons.push(format!(
            "文字数が超過しています（{}文字 / 最大{}文字）",
            length, options.max_chars
        ));
    }

    for label in labels(&run_rules(&FORBIDDEN_PHRASES, body)) {
        reasons.push(format!("禁止表現が含まれています: {}", label));
    }
    for label in labels(&run_rules(&FORBIDDEN_PATTERNS, body)) {
        reasons.push(format!("避けるべき定型表現が含まれています: {}", label));
    }

    check_confirmation_marker(body, options, &mut reasons);

    let mode_vocab = match options.mode {
        Mode::Complete => Some(&*COMPLETE_FORBIDDEN_VOCAB),
        Mode::Consulting => Some(&*CONSULTING_FORBIDDEN_VOCAB),
        Mode::Draft | Mode::Event => None,
    };
    if let Some(vocab) = mode_vocab {
        for label in labels(&run_rules(vocab, body)) {
            reasons.push(format!("{}モードで使えない表現です: {}", options.mode, label));
        }
    }

    let has_proof_points = options.has_proof_points || proof_points.iter().any(|p| !p.trim().is_empty());
    if !has_proof_points {
        let claims: Vec<&str> = NUMERIC_CLAIM.find_iter(body).map(|m| m.as_str()).collect();
        if !claims.is_empty() {
            reasons.push(format!(
                "根拠のない数値が含まれています（捏造の可能性）: {}",
                claims.join("、")
            ));
        }
    }

    if !options.has_recent_news {
        for label in labels(&run_rules(&NEWS_ASSERTIONS, body)) {
            reasons.push(format!("ニュース情報がないのに断定しています: {}", label));
        }
    }

    let telegraphic = TELEGRAPHIC_ENDING.find_iter(body).count();
    if telegraphic > MAX_TELEGRAPHIC_SENTENCES {
        reasons.push(format!(
            "体言止めの文が{}か所あります。手紙らしい文体で書いてください",
            telegraphic
        ));
    }

    if options.mode == Mode::Event {
        if let Some(position) = options.event_position {
            let contradictions = match position {
                EventPosition::Exhibitor => &*EXHIBITOR_CONTRADICTIONS,
                EventPosition::Visitor => &*VISITOR_CONTRADICTIONS,
            };
            for label in labels(&run_rules(contradictions, body)) {
                reasons.push(format!("立場が矛盾しています: {}", label));
            }
        }
    }

    debug!(mode = %options.mode, chars = length, violations = reasons.len(), "Draft validated");
    QualityResult::from_reasons(reasons)
}

fn check_confirmation_marker(body: &str, options: &ValidateOptions, reasons: &mut Vec<String>) {
    let has_marker = CONFIRMATION_MARKER.is_match(body);
    match options.mode {
        Mode::Complete | Mode::Consulting if has_marker => {
            reasons.push("【要確認】マーカーが残っています。確定した内容に置き換えてください".to_string());
        }
        Mode::Draft if options.missing_info_high_count > 0 && !has_marker => {
            reasons.push(format!(
                "不足情報が{}件ありますが【要確認】マーカーがありません",
                options.missing_info_high_count
            ));
        }
        _ => {}
    }
}
