//! Options, results and attempts shared by the validators, scorers and the
//! retry loop.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Generation mode; selects which rule and scoring tables apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Missing information is expected and must be marked for confirmation
    Draft,
    /// Ready-to-send letter
    #[default]
    Complete,
    /// Invitation around a trade show or event
    Event,
    /// Hypothesis-led consulting letter
    Consulting,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Draft => "draft",
            Mode::Complete => "complete",
            Mode::Event => "event",
            Mode::Consulting => "consulting",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the event the sender is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPosition {
    /// The sender exhibits and invites the recipient to its booth
    Exhibitor,
    /// The sender visits and asks to meet at the recipient's booth
    Visitor,
}

/// Options for `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Mode. Default: complete.
    pub mode: Mode,

    /// Minimum body length in characters. Default: 250.
    pub min_chars: usize,

    /// Maximum body length in characters. Default: 650.
    pub max_chars: usize,

    /// Figures in the body are backed by supplied proof points
    pub has_proof_points: bool,

    /// Recent news was supplied, so announcement phrasing is grounded
    pub has_recent_news: bool,

    /// Number of high-priority items the user left blank (draft mode)
    pub missing_info_high_count: usize,

    /// Sender's side of the event (event mode)
    pub event_position: Option<EventPosition>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Complete,
            min_chars: 250,
            max_chars: 650,
            has_proof_points: false,
            has_recent_news: false,
            missing_info_high_count: 0,
            event_position: None,
        }
    }
}

impl ValidateOptions {
    /// Options for a mode with default bounds.
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the length bounds.
    pub fn with_length(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.min_chars = min_chars;
        self.max_chars = max_chars;
        self
    }

    /// Mark figures in the body as backed by proof points.
    pub fn with_proof_points(mut self, has_proof_points: bool) -> Self {
        self.has_proof_points = has_proof_points;
        self
    }

    /// Mark announcement phrasing as backed by recent news.
    pub fn with_recent_news(mut self, has_recent_news: bool) -> Self {
        self.has_recent_news = has_recent_news;
        self
    }

    /// Set the number of unanswered high-priority items.
    pub fn with_missing_info_high_count(mut self, count: usize) -> Self {
        self.missing_info_high_count = count;
        self
    }

    /// Set the sender's side of the event.
    pub fn with_event_position(mut self, position: EventPosition) -> Self {
        self.event_position = Some(position);
        self
    }
}

/// Outcome of deterministic validation. `ok` iff `reasons` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityResult {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl QualityResult {
    /// Build a result from accumulated reasons.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }
}

/// Score on a 0-100 scale with its per-axis breakdown.
///
/// Standard mode records axis points; event and consulting modes record
/// each penalty category as a non-positive deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetailedScore {
    pub total: u8,
    pub breakdown: IndexMap<String, i32>,
    pub suggestions: Vec<String>,
}

impl DetailedScore {
    /// Build a score, clamping the raw total into `0..=100`.
    pub fn new(raw_total: i32, breakdown: IndexMap<String, i32>, suggestions: Vec<String>) -> Self {
        Self {
            total: clamp_total(raw_total),
            breakdown,
            suggestions,
        }
    }

    /// Lower the total to at most `cap`. Never raises it.
    pub fn cap_at(&mut self, cap: u8) {
        self.total = self.total.min(cap);
    }

    /// Subtract `points` from the total, stopping at zero.
    pub fn deduct(&mut self, points: u32) {
        let points = u8::try_from(points).unwrap_or(u8::MAX);
        self.total = self.total.saturating_sub(points);
    }

    /// Add a suggestion unless it is already present.
    pub fn suggest(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }
}

/// Clamp a raw score into `0..=100`.
pub fn clamp_total(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

/// Event-mode score.
pub type EventScore = DetailedScore;

/// Consulting-mode score.
pub type ConsultingScore = DetailedScore;

/// Strength of the hook-bridge-hypothesis opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeQuality {
    Strong,
    Weak,
    Missing,
}

/// Opening-window structure signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeDetectionResult {
    pub quality: BridgeQuality,
    pub has_hook: bool,
    pub has_bridge_text: bool,
    pub has_hypothesis: bool,
}

/// One drafted, validated and scored attempt. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationAttempt {
    pub attempt_index: usize,
    pub draft_text: String,
    pub validation: QualityResult,
    pub score: DetailedScore,
}
