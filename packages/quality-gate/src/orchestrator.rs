//! Bounded draft-evaluate-correct loop.
//!
//! Each attempt is drafted, validated and scored. An attempt that reaches
//! the acceptance threshold ends the loop; otherwise its violation reasons
//! and score suggestions are fed back as correction instructions for the
//! next attempt. When the budget runs out the best attempt is returned,
//! so a caller gets an imperfect draft rather than an error whenever at
//! least one draft was produced.

use std::time::Duration;

use tracing::{info, warn};

use crate::drafter::{DraftRequest, Drafter};
use crate::error::{DraftError, DraftResult, GenerationError, Result};
use crate::evaluation::Evaluation;
use crate::types::GenerationAttempt;

/// Heading placed above the correction instructions on a retry.
pub const CORRECTION_HEADER: &str = "【前回の草稿への修正指示】次の点を修正して書き直してください。";

/// Retry loop configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts per generation, including the first
    pub max_attempts: usize,

    /// Score at or above which an attempt is accepted
    pub accept_threshold: u8,

    /// Correction instructions carried into the next attempt
    pub max_improvement_points: usize,

    /// Temperature of the first attempt
    pub temperature: f32,

    /// Temperature of later attempts
    pub retry_temperature: f32,

    /// Pause after a failed drafter call
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            accept_threshold: 80,
            max_improvement_points: 3,
            temperature: 0.7,
            retry_temperature: 0.4,
            backoff: Duration::from_millis(500),
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_accept_threshold(mut self, threshold: u8) -> Self {
        self.accept_threshold = threshold;
        self
    }

    pub fn with_max_improvement_points(mut self, points: usize) -> Self {
        self.max_improvement_points = points;
        self
    }

    pub fn with_temperatures(mut self, first: f32, retry: f32) -> Self {
        self.temperature = first;
        self.retry_temperature = retry;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn temperature_for(&self, attempt_index: usize) -> f32 {
        if attempt_index == 0 {
            self.temperature
        } else {
            self.retry_temperature
        }
    }
}

/// Result of a generation: the chosen attempt and every attempt made.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub selected: GenerationAttempt,
    pub attempts: Vec<GenerationAttempt>,
    /// The selected attempt reached the acceptance threshold
    pub accepted: bool,
}

/// Drives the drafter until a draft is accepted or the budget runs out.
pub struct RetryOrchestrator<D: Drafter> {
    drafter: D,
    evaluation: Evaluation,
    config: RetryConfig,
}

impl<D: Drafter> RetryOrchestrator<D> {
    pub fn new(drafter: D, evaluation: Evaluation) -> Self {
        Self {
            drafter,
            evaluation,
            config: RetryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RetryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Generate a letter for `prompt`.
    ///
    /// Fails only when the final drafter call fails and no earlier attempt
    /// produced a draft.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationOutcome> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempts: Vec<GenerationAttempt> = Vec::with_capacity(max_attempts);
        let mut corrections: Vec<String> = Vec::new();
        let mut last_error: Option<DraftError> = None;

        for attempt_index in 0..max_attempts {
            let is_final = attempt_index + 1 == max_attempts;
            let request = DraftRequest {
                prompt: with_corrections(prompt, &corrections),
                temperature: self.config.temperature_for(attempt_index),
                attempt_index,
            };

            let draft_text = match self.draft(&request).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(attempt = attempt_index, error = %e, "Drafter call failed");
                    if !is_final {
                        tokio::time::sleep(self.config.backoff).await;
                    }
                    last_error = Some(e);
                    continue;
                }
            };

            let (validation, score) = self.evaluation.evaluate(&draft_text);
            let attempt = GenerationAttempt {
                attempt_index,
                draft_text,
                validation,
                score,
            };
            info!(
                attempt = attempt_index,
                mode = %self.evaluation.mode(),
                score = attempt.score.total,
                valid = attempt.validation.ok,
                violations = attempt.validation.reasons.len(),
                "Draft evaluated"
            );

            let accepted = attempt.score.total >= self.config.accept_threshold;
            corrections = improvement_points(&attempt, self.config.max_improvement_points);
            attempts.push(attempt);

            if accepted {
                let selected = attempts[attempts.len() - 1].clone();
                return Ok(GenerationOutcome {
                    selected,
                    attempts,
                    accepted: true,
                });
            }
        }

        match select_best(&attempts).cloned() {
            Some(selected) => {
                info!(
                    attempts = attempts.len(),
                    selected = selected.attempt_index,
                    score = selected.score.total,
                    "Attempt budget exhausted, returning best draft"
                );
                Ok(GenerationOutcome {
                    selected,
                    attempts,
                    accepted: false,
                })
            }
            None => Err(GenerationError::Failed {
                attempts: max_attempts,
                source: last_error.unwrap_or(DraftError::EmptyDraft),
            }),
        }
    }

    async fn draft(&self, request: &DraftRequest) -> DraftResult<String> {
        let text = self.drafter.draft(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DraftError::EmptyDraft);
        }
        Ok(text.to_string())
    }
}

/// Pick the attempt to return once the budget is spent.
///
/// Highest total wins; ties go to the most recent attempt.
pub fn select_best(attempts: &[GenerationAttempt]) -> Option<&GenerationAttempt> {
    attempts
        .iter()
        .max_by_key(|a| (a.score.total, a.attempt_index))
}

/// Correction instructions for the next attempt: violation reasons first,
/// then score suggestions, without duplicates.
pub fn improvement_points(attempt: &GenerationAttempt, max: usize) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    let candidates = attempt
        .validation
        .reasons
        .iter()
        .chain(attempt.score.suggestions.iter());
    for candidate in candidates {
        if points.len() == max {
            break;
        }
        if !points.contains(candidate) {
            points.push(candidate.clone());
        }
    }
    points
}

fn with_corrections(prompt: &str, corrections: &[String]) -> String {
    if corrections.is_empty() {
        return prompt.to_string();
    }
    let mut out = format!("{}\n\n{}", prompt, CORRECTION_HEADER);
    for point in corrections {
        out.push_str("\n- ");
        out.push_str(point);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DetailedScore, QualityResult};
    use indexmap::IndexMap;

    fn attempt(index: usize, total: i32, reasons: &[&str]) -> GenerationAttempt {
        GenerationAttempt {
            attempt_index: index,
            draft_text: format!("draft {}", index),
            validation: QualityResult::from_reasons(reasons.iter().map(|r| r.to_string()).collect()),
            score: DetailedScore::new(total, IndexMap::new(), vec![]),
        }
    }

    #[test]
    fn test_select_best_prefers_highest_total() {
        let attempts = vec![attempt(0, 72, &[]), attempt(1, 65, &[])];
        assert_eq!(select_best(&attempts).map(|a| a.attempt_index), Some(0));
    }

    #[test]
    fn test_select_best_ties() {
        let tied = vec![attempt(0, 60, &[]), attempt(1, 60, &[])];
        assert_eq!(select_best(&tied).map(|a| a.attempt_index), Some(1));

        // Validation does not break a tie
        let valid_first = vec![attempt(0, 60, &[]), attempt(1, 60, &["文字数"])];
        assert_eq!(select_best(&valid_first).map(|a| a.attempt_index), Some(1));

        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_improvement_points_order_and_limit() {
        let mut a = attempt(0, 50, &["理由A", "理由B"]);
        a.score.suggestions = vec!["理由B".to_string(), "提案C".to_string(), "提案D".to_string()];

        assert_eq!(improvement_points(&a, 3), vec!["理由A", "理由B", "提案C"]);
        assert_eq!(improvement_points(&a, 1), vec!["理由A"]);
        assert!(improvement_points(&a, 0).is_empty());
    }

    #[test]
    fn test_with_corrections() {
        assert_eq!(with_corrections("依頼文", &[]), "依頼文");
        let prompt = with_corrections("依頼文", &["理由A".to_string(), "提案B".to_string()]);
        assert!(prompt.starts_with("依頼文\n\n"));
        assert!(prompt.contains(CORRECTION_HEADER));
        assert!(prompt.ends_with("- 理由A\n- 提案B"));
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.accept_threshold, 80);
        assert_eq!(config.max_improvement_points, 3);
        assert_eq!(config.temperature_for(0), 0.7);
        assert_eq!(config.temperature_for(1), 0.4);
    }
}
