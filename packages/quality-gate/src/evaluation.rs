//! Everything needed to judge a draft, bundled once per generation.

use fact_extraction::{Fact, FactExtractionResult};

use crate::score::{score, score_consulting, score_event, ScoreContext};
use crate::structure::{apply_structural_caps, StructuralContext};
use crate::types::{DetailedScore, Mode, QualityResult, ValidateOptions};
use crate::validate::validate;

/// Evidence and options a draft is validated and scored against.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub options: ValidateOptions,
    pub proof_points: Vec<String>,
    pub facts: Vec<Fact>,
    /// A target company was resolved for this letter
    pub has_target: bool,
    /// Free text the user supplied with the request
    pub user_input: Option<String>,
    /// Source URLs the letter may be cited against
    pub citations: Vec<String>,
}

impl Evaluation {
    pub fn new(options: ValidateOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        Self::new(ValidateOptions::for_mode(mode))
    }

    pub fn with_facts(mut self, facts: Vec<Fact>) -> Self {
        self.facts = facts;
        self
    }

    /// Use a crawl result as evidence: its facts, and its sources (primary
    /// first) as citations. A crawl always targets a company.
    pub fn with_extraction(mut self, result: &FactExtractionResult) -> Self {
        self.facts = result.facts.clone();
        self.citations = result
            .primary_sources()
            .chain(result.sources.iter().filter(|s| !s.is_primary))
            .map(|s| s.url.clone())
            .collect();
        self.has_target = true;
        self
    }

    pub fn with_proof_points(mut self, proof_points: Vec<String>) -> Self {
        self.proof_points = proof_points;
        self
    }

    pub fn with_target(mut self, has_target: bool) -> Self {
        self.has_target = has_target;
        self
    }

    pub fn with_user_input(mut self, user_input: impl Into<String>) -> Self {
        self.user_input = Some(user_input.into());
        self
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }

    pub fn mode(&self) -> Mode {
        self.options.mode
    }

    pub fn validate(&self, body: &str) -> QualityResult {
        validate(body, &self.proof_points, &self.options)
    }

    /// Score with the mode's scorer, then apply the structural caps.
    pub fn score(&self, body: &str) -> DetailedScore {
        let base = match self.options.mode {
            Mode::Draft | Mode::Complete => {
                let mut ctx = ScoreContext::new()
                    .with_facts(&self.facts)
                    .with_target(self.has_target)
                    .with_proof_points(&self.proof_points);
                if let Some(input) = self.user_input.as_deref() {
                    ctx = ctx.with_user_input(input);
                }
                score(body, &ctx)
            }
            Mode::Event => score_event(body, self.options.event_position),
            Mode::Consulting => score_consulting(body),
        };

        let ctx = StructuralContext {
            facts: &self.facts,
            proof_points: &self.proof_points,
            citations: &self.citations,
            has_target: self.has_target,
        };
        apply_structural_caps(base, body, &ctx)
    }

    pub fn evaluate(&self, body: &str) -> (QualityResult, DetailedScore) {
        (self.validate(body), self.score(body))
    }
}
