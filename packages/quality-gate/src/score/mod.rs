//! Scoring on a 0-100 scale.
//!
//! - `standard` - five additive axes for draft and complete letters
//! - `event` - penalty table for event invitations
//! - `consulting` - penalty table for consulting letters

mod consulting;
mod event;
mod standard;

pub use consulting::score_consulting;
pub use event::score_event;
pub use standard::{score, ScoreContext};

use indexmap::IndexMap;

use crate::rules::RuleGroup;
use crate::types::DetailedScore;

/// Start from 100 and subtract each group's capped penalty.
///
/// The breakdown records every group, as a non-positive deduction, in
/// table order.
pub(crate) fn penalty_table_score(
    body: &str,
    groups: &[RuleGroup],
    extra: Vec<(&'static str, u32, Vec<&'static str>)>,
) -> DetailedScore {
    let mut breakdown = IndexMap::new();
    let mut suggestions = Vec::new();
    let mut total: i32 = 100;

    let evaluated = groups.iter().map(|group| {
        let (penalty, hits) = group.evaluate(body);
        let labels: Vec<&'static str> = hits.iter().map(|hit| hit.rule.label).collect();
        (group.category, penalty, labels)
    });

    for (category, penalty, labels) in evaluated.chain(extra) {
        breakdown.insert(category.to_string(), -(penalty as i32));
        total -= penalty as i32;
        for label in labels {
            let suggestion = format!("{}を修正してください", label);
            if !suggestions.contains(&suggestion) {
                suggestions.push(suggestion);
            }
        }
    }

    DetailedScore::new(total, breakdown, suggestions)
}
