//! Hook, bridge and hypothesis detection over the opening window.

use fact_extraction::Fact;

use crate::facts::quotes_any_fact;
use crate::lexicon::{BRIDGE_PHRASES, HOOK_CUES, HYPOTHESIS_MARKERS};
use crate::rules::any_match;
use crate::types::{BridgeDetectionResult, BridgeQuality};
use crate::window::{opening_window, OPENING_WINDOW_CHARS};

/// Detect the three opening signals in the first 200 characters.
///
/// The hook is a quoted fact key. Without any facts, an explicit reference
/// to something the recipient published counts instead.
pub fn detect_bridge_structure(body: &str, facts: &[Fact]) -> BridgeDetectionResult {
    let window = opening_window(body, OPENING_WINDOW_CHARS);

    let has_hook = if facts.is_empty() {
        any_match(&HOOK_CUES, window)
    } else {
        quotes_any_fact(window, facts)
    };
    let has_bridge_text = any_match(&BRIDGE_PHRASES, window);
    let has_hypothesis = any_match(&HYPOTHESIS_MARKERS, window);

    let signals = [has_hook, has_bridge_text, has_hypothesis]
        .iter()
        .filter(|signal| **signal)
        .count();
    let quality = match signals {
        3 => BridgeQuality::Strong,
        2 => BridgeQuality::Weak,
        _ => BridgeQuality::Missing,
    };

    BridgeDetectionResult {
        quality,
        has_hook,
        has_bridge_text,
        has_hypothesis,
    }
}
