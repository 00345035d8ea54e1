//! Penalty-table scoring for consulting letters.

use crate::lexicon::{CONSULTING_PENALTIES, HYPOTHESIS_MARKERS};
use crate::rules::any_match;
use crate::score::penalty_table_score;
use crate::types::ConsultingScore;

const MISSING_HYPOTHESIS_PENALTY: u32 = 10;

/// Score a consulting letter from 100 down.
///
/// A consulting letter leads with a hypothesis, so a body with no
/// tentative claim at all loses points besides the table penalties.
pub fn score_consulting(body: &str) -> ConsultingScore {
    let missing_hypothesis = if any_match(&HYPOTHESIS_MARKERS, body) {
        (0, Vec::new())
    } else {
        (MISSING_HYPOTHESIS_PENALTY, vec!["仮説の提示がない点"])
    };

    penalty_table_score(
        body,
        &CONSULTING_PENALTIES,
        vec![("missingHypothesis", missing_hypothesis.0, missing_hypothesis.1)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypothesis_led_letter_scores_full() {
        let body = "海外拠点の立ち上げに伴い、現地の品質管理体制の整備が次の焦点になるのではないでしょうか。";
        let score = score_consulting(body);
        assert_eq!(score.total, 100);
        assert_eq!(score.breakdown.len(), 6);
    }

    #[test]
    fn test_citation_leak_and_hedging() {
        let body = "出典：貴社統合報告書。課題があるかもしれません。おそらく対応が必要と思われます。";
        let score = score_consulting(body);
        assert_eq!(score.breakdown["citationLeak"], -15);
        assert_eq!(score.breakdown["hedging"], -15);
        assert_eq!(score.breakdown["missingHypothesis"], -10);
        assert_eq!(score.total, 60);
    }

    #[test]
    fn test_total_never_negative() {
        let body = "出典：https://example.com [1] 貴社の課題は明らかです。間違いなく【要確認】〇〇。業務効率化、DX推進、生産性向上、コスト削減。かもしれません。おそらく。と思われます。".repeat(3);
        assert_eq!(score_consulting(&body).total, 0);
    }
}
