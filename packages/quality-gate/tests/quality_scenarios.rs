use fact_extraction::{Fact, FactCategory, SourceCategory};
use proptest::prelude::*;
use quality_gate::{
    detect_bridge_structure, score, validate, BridgeQuality, Evaluation, Mode, ScoreContext,
    ValidateOptions,
};

const SOURCE: &str = "https://example.co.jp/news/2024/0401.html";

const COMPLETE_LETTER: &str = "株式会社サンプル製作所 生産管理部ご担当者様

北九州新工場の稼働に関する記事を拝見しました。新しいラインの立ち上げに向けた皆様のご尽力に、心より敬意を表します。こうした生産拡大の局面では、検査工程の人員確保と品質の安定化が大きな課題になるのではないでしょうか。

弊社は、画像検査装置と運用設計を組み合わせた外観検査の自動化をご提案しております。熟練者の判断基準をデータとして蓄積し、新しいラインでも同じ基準で検査できる仕組みを整えることで、立ち上げ期の負担を抑えることができます。

同じく新工場を立ち上げられた部品メーカー様の事例では、稼働初期から検査基準を統一でき、現場の教育にかかる時間も短くなったとのお声をいただいております。

貴社の品質へのお取り組みに沿った進め方を具体的にご説明できればと考えております。もしよろしければ、オンラインで三十分ほどお時間をいただけないでしょうか。

株式会社テックビジョン 営業部 山田太郎";

fn fact(content: &str, category: FactCategory) -> Fact {
    Fact {
        content: content.to_string(),
        category,
        source_url: SOURCE.to_string(),
        source_title: Some("北九州新工場 稼働のお知らせ".to_string()),
        source_category: SourceCategory::News,
    }
}

fn crawled_facts() -> Vec<Fact> {
    vec![
        fact("北九州新工場", FactCategory::ProperNouns),
        fact("従業員数3,000名", FactCategory::Numbers),
    ]
}

fn complete_evaluation() -> Evaluation {
    Evaluation::for_mode(Mode::Complete)
        .with_facts(crawled_facts())
        .with_target(true)
        .with_citations(vec![SOURCE.to_string()])
}

#[test]
fn test_complete_letter_passes_and_scores_high() {
    let (validation, score) = complete_evaluation().evaluate(COMPLETE_LETTER);

    assert!(validation.ok, "{:?}", validation.reasons);
    assert!(score.total >= 80, "{:?}", score);
    assert_eq!(score.breakdown["ctaClarity"], 14);
    assert_eq!(score.breakdown["structureCompleteness"], 20);
    assert_eq!(score.breakdown["ngPenalty"], 20);
}

#[test]
fn test_complete_letter_has_strong_bridge() {
    let bridge = detect_bridge_structure(COMPLETE_LETTER, &crawled_facts());
    assert_eq!(bridge.quality, BridgeQuality::Strong);
}

#[test]
fn test_hook_only_opening_is_not_capped() {
    let body = COMPLETE_LETTER.replace(
        "こうした生産拡大の局面では、検査工程の人員確保と品質の安定化が大きな課題になるのではないでしょうか。",
        "生産拡大の局面では、検査工程の人員確保と品質の安定化が大きな課題になると拝察いたします。",
    );
    let bridge = detect_bridge_structure(&body, &crawled_facts());
    assert_eq!(bridge.quality, BridgeQuality::Missing);
    assert!(bridge.has_hook);

    let (validation, score) = complete_evaluation().evaluate(&body);
    assert!(validation.ok, "{:?}", validation.reasons);
    assert!(score.total >= 80, "{:?}", score);
    assert!(score.suggestions.iter().any(|s| s.contains("橋渡し")));
}

#[test]
fn test_short_letter_fails_and_scores_low() {
    let body = "これは短すぎるレターです。";
    let (validation, score) = Evaluation::for_mode(Mode::Complete).evaluate(body);

    assert!(!validation.ok);
    assert!(validation.reasons.iter().any(|r| r.contains("文字数が不足")));
    assert!(score.total < 50, "{:?}", score);
}

#[test]
fn test_placeholder_fails_complete_mode() {
    let body = COMPLETE_LETTER.replace("株式会社サンプル製作所", "株式会社〇〇");
    let result = validate(&body, &[], &ValidateOptions::for_mode(Mode::Complete));
    assert!(!result.ok);
}

#[test]
fn test_unsupported_reduction_claim_is_flagged() {
    let body = COMPLETE_LETTER.replace("負担を抑えることができます", "検査工数を50%削減できます");
    let result = validate(&body, &[], &ValidateOptions::default());
    assert!(result.reasons.iter().any(|r| r.contains("根拠のない数値")));

    let backed = validate(&body, &[], &ValidateOptions::default().with_proof_points(true));
    assert!(backed.ok, "{:?}", backed.reasons);
}

#[test]
fn test_opening_without_any_signal_is_missing() {
    let body = format!("{}{}", "弊社のサービスについてご案内いたします。".repeat(12), COMPLETE_LETTER);
    let bridge = detect_bridge_structure(&body, &crawled_facts());
    assert_eq!(bridge.quality, BridgeQuality::Missing);

    let (_, score) = complete_evaluation().evaluate(&body);
    assert!(score.total <= 75);
}

#[test]
fn test_hedging_is_tolerated_only_in_draft_mode() {
    let body = COMPLETE_LETTER.replace("ではないでしょうか", "かもしれません");
    assert!(!Evaluation::for_mode(Mode::Complete).validate(&body).ok);
    assert!(Evaluation::for_mode(Mode::Draft).validate(&body).ok);
}

proptest! {
    #[test]
    fn score_total_stays_in_range(body in "\\PC{0,400}") {
        let facts = crawled_facts();
        let standard = score(&body, &ScoreContext::new().with_facts(&facts).with_target(true));
        prop_assert!(standard.total <= 100);

        for mode in [Mode::Draft, Mode::Complete, Mode::Event, Mode::Consulting] {
            let evaluated = Evaluation::for_mode(mode).with_facts(facts.clone()).score(&body);
            prop_assert!(evaluated.total <= 100);
        }
    }

    #[test]
    fn rule_heavy_text_stays_in_range(repeats in 1usize..20) {
        let body = "拝啓 取り急ぎ〇〇 必ず成果 業務効率化 出典：[1] 貴社の課題は明らかです。50%削減。".repeat(repeats);
        for mode in [Mode::Draft, Mode::Complete, Mode::Event, Mode::Consulting] {
            let (validation, score) = Evaluation::for_mode(mode).evaluate(&body);
            prop_assert!(!validation.ok);
            prop_assert!(score.total <= 100);
        }
    }
}
