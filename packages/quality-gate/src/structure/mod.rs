//! Structural analyzers and the caps they impose on a score.
//!
//! - `bridge` - hook / bridge / hypothesis in the opening window
//! - `baseless` - untraceable figures and decisive diagnoses
//! - `attribution` - facts without sources, citations without facts

mod attribution;
mod baseless;
mod bridge;

pub use attribution::validate_source_attribution;
pub use baseless::{detect_baseless_assertions, BaselessAssertionResult};
pub use bridge::detect_bridge_structure;

use fact_extraction::Fact;
use tracing::debug;

use crate::types::{BridgeQuality, DetailedScore};

/// Cap when attribution issues were found.
pub const ATTRIBUTION_CAP: u8 = 75;

/// Evidence the structural analyzers check the body against.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralContext<'a> {
    pub facts: &'a [Fact],
    pub proof_points: &'a [String],
    pub citations: &'a [String],
    pub has_target: bool,
}

/// Fold structural findings into an already computed score.
///
/// Baseless-assertion penalties are subtracted and attribution issues cap
/// the total. A missing bridge (with facts on hand) only adds a suggestion.
/// The total can only go down.
pub fn apply_structural_caps(
    mut score: DetailedScore,
    body: &str,
    ctx: &StructuralContext<'_>,
) -> DetailedScore {
    let before = score.total;

    let baseless = detect_baseless_assertions(body, ctx.facts, ctx.proof_points);
    if baseless.penalty > 0 {
        score.deduct(baseless.penalty);
        score
            .breakdown
            .insert("baselessPenalty".to_string(), -(baseless.penalty as i32));
        for issue in &baseless.issues {
            score.suggest(format!("{}（根拠を示すか削除してください）", issue));
        }
    }

    if !ctx.facts.is_empty() {
        let bridge = detect_bridge_structure(body, ctx.facts);
        if bridge.quality == BridgeQuality::Missing {
            score.suggest("冒頭で事実を引用し、つなぎの一文と仮説で本題へ橋渡ししてください");
        }
    }

    let attribution = validate_source_attribution(body, ctx.facts, ctx.citations, ctx.has_target);
    if !attribution.is_empty() {
        score.cap_at(ATTRIBUTION_CAP);
        for issue in attribution {
            score.suggest(issue);
        }
    }

    debug!(before = before, after = score.total, "Structural caps applied");
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fact;
    use fact_extraction::FactCategory;
    use indexmap::IndexMap;

    fn full_score() -> DetailedScore {
        DetailedScore::new(95, IndexMap::new(), vec![])
    }

    #[test]
    fn test_clean_body_keeps_score() {
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let citations = vec!["https://example.co.jp/news/2024/0401.html".to_string()];
        let ctx = StructuralContext {
            facts: &facts,
            citations: &citations,
            has_target: true,
            ..Default::default()
        };
        let body = "北九州新工場の稼働を拝見しました。こうした局面では検査工程の人員確保が課題になるのではないでしょうか。";

        assert_eq!(apply_structural_caps(full_score(), body, &ctx).total, 95);
    }

    #[test]
    fn test_baseless_penalty_is_subtracted() {
        let score = apply_structural_caps(
            full_score(),
            "不良率を35%改善します。",
            &StructuralContext::default(),
        );
        assert_eq!(score.total, 90);
        assert_eq!(score.breakdown["baselessPenalty"], -5);
    }

    #[test]
    fn test_missing_bridge_only_suggests() {
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let ctx = StructuralContext {
            facts: &facts,
            ..Default::default()
        };
        let score = apply_structural_caps(full_score(), "弊社のご紹介です。", &ctx);
        assert_eq!(score.total, 95);
        assert!(score.suggestions.iter().any(|s| s.contains("橋渡し")));
    }

    #[test]
    fn test_attribution_issues_cap() {
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let ctx = StructuralContext {
            facts: &facts,
            has_target: true,
            ..Default::default()
        };
        let body = "北九州新工場の稼働を拝見しました。こうした局面では課題になるのではないでしょうか。";
        let score = apply_structural_caps(full_score(), body, &ctx);
        assert_eq!(score.total, ATTRIBUTION_CAP);
    }

    #[test]
    fn test_never_raises() {
        let low = DetailedScore::new(30, IndexMap::new(), vec![]);
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let ctx = StructuralContext {
            facts: &facts,
            has_target: true,
            ..Default::default()
        };
        assert_eq!(apply_structural_caps(low, "弊社のご紹介です。", &ctx).total, 30);
    }
}
