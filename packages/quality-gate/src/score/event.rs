//! Penalty-table scoring for event invitations.

use crate::lexicon::{EVENT_CTAS, EVENT_PENALTIES, EXHIBITOR_CONTRADICTIONS, VISITOR_CONTRADICTIONS};
use crate::rules::{capped_penalty, distinct_matches, labels, run_rules};
use crate::score::penalty_table_score;
use crate::types::{EventPosition, EventScore};

const DUAL_CTA_PENALTY: u32 = 15;
const POSITION_CAP: u32 = 20;

/// Score an event invitation from 100 down.
///
/// Categories: competing calls to action, unconfirmed speakers, a warm
/// greeting in a cold letter, NG expressions and, when the sender's
/// position is known, contradictions of that position.
pub fn score_event(body: &str, position: Option<EventPosition>) -> EventScore {
    let dual_cta = if distinct_matches(&EVENT_CTAS, body) >= 2 {
        (DUAL_CTA_PENALTY, vec!["複数の行動喚起（1つに絞る）"])
    } else {
        (0, Vec::new())
    };

    let contradiction = match position {
        Some(position) => {
            let table = match position {
                EventPosition::Exhibitor => &*EXHIBITOR_CONTRADICTIONS,
                EventPosition::Visitor => &*VISITOR_CONTRADICTIONS,
            };
            let hits = run_rules(table, body);
            (capped_penalty(&hits, POSITION_CAP), labels(&hits))
        }
        None => (0, Vec::new()),
    };

    penalty_table_score(
        body,
        &EVENT_PENALTIES,
        vec![
            ("dualCta", dual_cta.0, dual_cta.1),
            ("positionContradiction", contradiction.0, contradiction.1),
        ],
    )
}
