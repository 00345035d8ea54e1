//! Quality Gate for Drafted Sales Letters
//!
//! Deterministic validation and scoring of Japanese sales-letter drafts,
//! structural checks of how a draft uses the facts it was given, and a
//! bounded regeneration loop that feeds violations back to the drafter.
//!
//! # Design Philosophy
//!
//! - Validation and scoring are pure functions of the text and its evidence
//! - Every rule runs; violations accumulate instead of short-circuiting
//! - Rules live in data tables evaluated by one generic runner
//! - Caps only ever lower a score
//! - A best-effort draft is preferred over an error
//!
//! # Usage
//!
//! ```rust,ignore
//! use quality_gate::{Evaluation, Mode, RetryOrchestrator};
//!
//! let evaluation = Evaluation::for_mode(Mode::Complete).with_extraction(&facts);
//! let orchestrator = RetryOrchestrator::new(drafter, evaluation);
//!
//! let outcome = orchestrator.generate(&prompt).await?;
//! println!("{} ({})", outcome.selected.draft_text, outcome.selected.score.total);
//! ```
//!
//! # Modules
//!
//! - [`validate`] - per-mode validation rules
//! - [`score`] - standard, event and consulting scoring
//! - [`structure`] - bridge, baseless-assertion and attribution analyzers
//! - [`orchestrator`] - the retry loop
//! - [`testing`] - Scripted drafter for tests

#[cfg(feature = "openai")]
mod ai;
pub mod drafter;
pub mod error;
pub mod evaluation;
pub mod facts;
pub mod lexicon;
pub mod orchestrator;
pub mod rules;
pub mod score;
pub mod structure;
pub mod testing;
pub mod types;
pub mod validate;
pub mod window;

pub use drafter::{DraftRequest, Drafter};
pub use error::{DraftError, DraftResult, GenerationError, Result};
pub use evaluation::Evaluation;
pub use orchestrator::{improvement_points, select_best, GenerationOutcome, RetryConfig, RetryOrchestrator};
pub use rules::{Matcher, Rule, RuleGroup, RuleHit};
pub use score::{score, score_consulting, score_event, ScoreContext};
pub use structure::{
    apply_structural_caps, detect_baseless_assertions, detect_bridge_structure,
    validate_source_attribution, BaselessAssertionResult, StructuralContext,
};
pub use types::{
    BridgeDetectionResult, BridgeQuality, ConsultingScore, DetailedScore, EventPosition,
    EventScore, GenerationAttempt, Mode, QualityResult, ValidateOptions,
};
pub use validate::validate;

pub use testing::ScriptedDrafter;
