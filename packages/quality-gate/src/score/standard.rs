//! Five-axis scoring for draft and complete letters.

use fact_extraction::Fact;
use indexmap::IndexMap;
use tracing::debug;

use crate::facts::quotes_any_fact;
use crate::lexicon::{
    CITATION_LEAK, CTA_PATTERNS, EMPATHY_PATTERNS, NG_EXPRESSIONS, NUMERIC_TOKEN, PROPER_NOUN,
    STRUCTURE_ELEMENTS, TEMPLATE_PHRASES,
};
use crate::rules::{distinct_matches, run_rules, RuleHit};
use crate::types::DetailedScore;
use crate::window::{opening_window, OPENING_WINDOW_CHARS};

const AXIS_MAX: i32 = 20;
const EMPATHY_POINTS: i32 = 5;
const FIRST_CTA_POINTS: i32 = 14;
const EXTRA_CTA_POINTS: i32 = 3;

/// Cap for stock phrases the user never asked for.
pub const TEMPLATE_CAP: u8 = 75;
/// Cap for an opening that quotes none of the supplied facts.
pub const OPENING_CITATION_CAP: u8 = 75;
/// Cap for citation markers left in the body.
pub const CITATION_LEAK_CAP: u8 = 75;

/// Evidence available to the scorer besides the body itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreContext<'a> {
    pub has_fact_numbers: bool,
    pub has_proper_nouns: bool,
    pub facts: &'a [Fact],
    /// A target company was resolved for this letter
    pub has_target: bool,
    /// What the user wrote in the request, which can justify stock phrases
    pub user_input: Option<&'a str>,
    pub proof_points: &'a [String],
}

impl<'a> ScoreContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply crawled facts; the figure and proper-noun flags follow them.
    pub fn with_facts(mut self, facts: &'a [Fact]) -> Self {
        self.facts = facts;
        self.has_fact_numbers |= crate::facts::has_numbers(facts);
        self.has_proper_nouns |= crate::facts::has_proper_nouns(facts);
        self
    }

    pub fn with_target(mut self, has_target: bool) -> Self {
        self.has_target = has_target;
        self
    }

    pub fn with_user_input(mut self, user_input: &'a str) -> Self {
        self.user_input = Some(user_input);
        self
    }

    pub fn with_proof_points(mut self, proof_points: &'a [String]) -> Self {
        self.proof_points = proof_points;
        self
    }
}

/// Score a draft on the five standard axes, then apply the hard caps.
///
/// Axes (0-20 each): specificity, empathy, CTA clarity, structural
/// completeness and the NG-expression axis, which starts full and loses
/// points per detected expression.
pub fn score(body: &str, ctx: &ScoreContext<'_>) -> DetailedScore {
    let mut suggestions = Vec::new();
    let window = opening_window(body, OPENING_WINDOW_CHARS);
    let opening_quotes_fact = quotes_any_fact(window, ctx.facts);

    let specificity = specificity(body, ctx, opening_quotes_fact, &mut suggestions);
    let empathy = empathy(body, &mut suggestions);
    let cta = cta_clarity(body, &mut suggestions);
    let structure = structure_completeness(body, &mut suggestions);
    let ng = ng_axis(body, &mut suggestions);

    let mut breakdown = IndexMap::new();
    breakdown.insert("specificity".to_string(), specificity);
    breakdown.insert("empathy".to_string(), empathy);
    breakdown.insert("ctaClarity".to_string(), cta);
    breakdown.insert("structureCompleteness".to_string(), structure);
    breakdown.insert("ngPenalty".to_string(), ng);

    let raw = specificity + empathy + cta + structure + ng;
    let mut score = DetailedScore::new(raw, breakdown, suggestions);

    let templates = run_rules(&TEMPLATE_PHRASES, body);
    let unjustified: Vec<&str> = templates
        .iter()
        .filter(|hit| !justified_by_user(hit, ctx.user_input))
        .map(|hit| hit.rule.label)
        .collect();
    if !unjustified.is_empty() {
        score.cap_at(TEMPLATE_CAP);
        score.suggest(format!(
            "定型的な訴求（{}）は具体的な根拠に置き換えてください",
            unjustified.join("、")
        ));
    }

    if !ctx.facts.is_empty() && ctx.has_target && !opening_quotes_fact {
        score.cap_at(OPENING_CITATION_CAP);
    }

    if CITATION_LEAK.is_match(body) {
        score.cap_at(CITATION_LEAK_CAP);
        score.suggest("本文から出典表記や参照番号を削除してください");
    }

    debug!(raw = raw, total = score.total, "Standard score computed");
    score
}

fn specificity(
    body: &str,
    ctx: &ScoreContext<'_>,
    opening_quotes_fact: bool,
    suggestions: &mut Vec<String>,
) -> i32 {
    let backed = ctx.has_fact_numbers || !ctx.proof_points.is_empty();
    let numbers = match (NUMERIC_TOKEN.is_match(body), backed) {
        (true, true) => 6,
        (true, false) => 3,
        (false, true) => 2,
        (false, false) => 0,
    };
    let nouns = if PROPER_NOUN.is_match(body) {
        6
    } else if ctx.has_proper_nouns {
        2
    } else {
        0
    };
    let hook = if ctx.facts.is_empty() {
        4
    } else if opening_quotes_fact {
        8
    } else {
        suggestions.push("冒頭200文字以内で企業の事実を引用してください".to_string());
        0
    };

    let points = (numbers + nouns + hook).min(AXIS_MAX);
    if numbers + nouns < 8 {
        suggestions.push("企業固有の数値や固有名詞を盛り込んでください".to_string());
    }
    points
}

fn empathy(body: &str, suggestions: &mut Vec<String>) -> i32 {
    let points = (distinct_matches(&EMPATHY_PATTERNS, body) as i32 * EMPATHY_POINTS).min(AXIS_MAX);
    if points < 10 {
        suggestions.push("相手の取り組みや状況に触れる表現を増やしてください".to_string());
    }
    points
}

fn cta_clarity(body: &str, suggestions: &mut Vec<String>) -> i32 {
    match distinct_matches(&CTA_PATTERNS, body) as i32 {
        0 => {
            suggestions.push("面談の依頼など具体的な次のアクションを明記してください".to_string());
            0
        }
        n => (FIRST_CTA_POINTS + EXTRA_CTA_POINTS * (n - 1)).min(AXIS_MAX),
    }
}

fn structure_completeness(body: &str, suggestions: &mut Vec<String>) -> i32 {
    let mut points = 0;
    let mut missing = Vec::new();
    for element in STRUCTURE_ELEMENTS.iter() {
        if element.matcher.is_match(body) {
            points += element.penalty as i32;
        } else {
            missing.push(element.label);
        }
    }
    if !missing.is_empty() {
        suggestions.push(format!("構成要素が不足しています: {}", missing.join("、")));
    }
    points.min(AXIS_MAX)
}

fn ng_axis(body: &str, suggestions: &mut Vec<String>) -> i32 {
    let hits = run_rules(&NG_EXPRESSIONS, body);
    let deduction: u32 = hits.iter().map(RuleHit::penalty).sum();
    for hit in &hits {
        let suggestion = format!("{}を避けてください", hit.rule.label);
        if !suggestions.contains(&suggestion) {
            suggestions.push(suggestion);
        }
    }
    (AXIS_MAX - deduction as i32).max(0)
}

fn justified_by_user(hit: &RuleHit<'_>, user_input: Option<&str>) -> bool {
    user_input.is_some_and(|input| hit.rule.matcher.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::fact;
    use fact_extraction::FactCategory;

    #[test]
    fn test_empty_body_scores_only_ng_axis() {
        let score = score("", &ScoreContext::new());
        assert_eq!(score.breakdown["specificity"], 4);
        assert_eq!(score.breakdown["empathy"], 0);
        assert_eq!(score.breakdown["ctaClarity"], 0);
        assert_eq!(score.breakdown["structureCompleteness"], 0);
        assert_eq!(score.breakdown["ngPenalty"], 20);
        assert_eq!(score.total, 24);
    }

    #[test]
    fn test_cta_points() {
        let one = score("お時間をいただけますと幸いです", &ScoreContext::new());
        assert_eq!(one.breakdown["ctaClarity"], 14);
        let three = score("お時間をいただけますか。ご都合をご返信ください", &ScoreContext::new());
        assert_eq!(three.breakdown["ctaClarity"], 20);
    }

    #[test]
    fn test_ng_axis_floors_at_zero() {
        let body = "拝啓 ご清栄のこととお慶び申し上げます。必ず成果が出ます。間違いなく。取り急ぎ。敬具";
        let score = score(body, &ScoreContext::new());
        assert_eq!(score.breakdown["ngPenalty"], 0);
        assert!(score.suggestions.iter().any(|s| s.contains("儀礼的な定型句")));
    }

    #[test]
    fn test_template_phrase_caps_unless_user_asked() {
        let body = "業務効率化".to_string()
            + "拝見しました。お取り組み、ご尽力、皆様、ご多忙。課題。ご提案。実績。お時間をいただけますか。ご都合。ご返信。「北九州新工場」1,200台";
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let proof = vec!["導入実績1,200台".to_string()];
        let ctx = ScoreContext::new().with_facts(&facts).with_proof_points(&proof);

        let capped = score(&body, &ctx);
        assert_eq!(capped.total, TEMPLATE_CAP);

        let asked = score(&body, &ctx.with_user_input("業務効率化を訴求したい"));
        assert!(asked.total > TEMPLATE_CAP);
    }

    #[test]
    fn test_missing_opening_citation_caps() {
        let facts = vec![fact("北九州新工場", FactCategory::ProperNouns)];
        let body = format!(
            "{}北九州新工場の稼働を拝見しました。お取り組み、ご尽力、皆様、ご多忙。課題。ご提案。実績。お時間をいただけますか。ご都合。ご返信。",
            "前置きの文章です。".repeat(30)
        );

        let without_target = score(&body, &ScoreContext::new().with_facts(&facts));
        let with_target = score(&body, &ScoreContext::new().with_facts(&facts).with_target(true));
        assert!(with_target.total <= OPENING_CITATION_CAP);
        assert!(with_target.total <= without_target.total);
    }

    #[test]
    fn test_citation_leak_caps() {
        let body = "拝見しました。お取り組み、ご尽力、皆様、ご多忙。このたび課題をご提案。実績。お時間をいただけますか。ご都合。ご返信。「製品A」[1]";
        let score = score(body, &ScoreContext::new());
        assert!(score.total <= CITATION_LEAK_CAP);
        assert!(score.suggestions.iter().any(|s| s.contains("出典")));
    }
}
