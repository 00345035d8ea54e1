use std::time::Duration;

use quality_gate::{
    Evaluation, GenerationError, Mode, RetryConfig, RetryOrchestrator, ScriptedDrafter,
};

/// Clean invitation: no penalty applies.
const ACCEPTABLE: &str = "来月の展示会にて、新しい検査装置を出展いたします。ぜひブースにお立ち寄りください。";

/// Warm greetings and unconfirmed speakers: 100 - 20 - 20.
const MEDIOCRE: &str = "いつもお世話になっております。平素よりお引き立ていただき、ありがとうございます。登壇者は未定です。講演者も調整中です。";

/// The mediocre draft padded past the minimum length: same score, but valid.
fn mediocre_but_valid() -> String {
    format!("{}{}", MEDIOCRE, "当日は新しい検査装置の実演をご覧いただけます。".repeat(9))
}

fn orchestrator(drafter: ScriptedDrafter) -> RetryOrchestrator<ScriptedDrafter> {
    RetryOrchestrator::new(drafter, Evaluation::for_mode(Mode::Event))
        .with_config(RetryConfig::default().with_backoff(Duration::ZERO))
}

#[tokio::test]
async fn test_first_attempt_accepted() {
    let drafter = ScriptedDrafter::new().with_draft(ACCEPTABLE).with_draft(MEDIOCRE);
    let outcome = orchestrator(drafter.clone()).generate("展示会の案内状").await.unwrap();

    assert!(outcome.accepted);
    assert_eq!(outcome.selected.attempt_index, 0);
    assert_eq!(outcome.selected.score.total, 100);
    assert_eq!(outcome.attempts.len(), 1);
    assert_eq!(drafter.call_count(), 1);
}

#[tokio::test]
async fn test_equal_scores_return_most_recent_attempt() {
    let drafter = ScriptedDrafter::new().with_draft(MEDIOCRE).with_draft(MEDIOCRE);
    let outcome = orchestrator(drafter.clone()).generate("展示会の案内状").await.unwrap();

    assert!(!outcome.accepted);
    assert_eq!(outcome.attempts.len(), 2);
    assert!(outcome.attempts.iter().all(|a| a.score.total == 60));
    assert_eq!(outcome.selected.attempt_index, 1);
}

#[tokio::test]
async fn test_equal_scores_prefer_recency_over_validation() {
    let drafter = ScriptedDrafter::new()
        .with_draft(mediocre_but_valid())
        .with_draft(MEDIOCRE);
    let outcome = orchestrator(drafter).generate("展示会の案内状").await.unwrap();

    assert_eq!(outcome.attempts.len(), 2);
    assert!(outcome.attempts[0].validation.ok, "{:?}", outcome.attempts[0].validation);
    assert!(!outcome.attempts[1].validation.ok);
    assert!(outcome.attempts.iter().all(|a| a.score.total == 60));
    assert_eq!(outcome.selected.attempt_index, 1);
}

#[tokio::test]
async fn test_retry_prompt_carries_corrections() {
    let drafter = ScriptedDrafter::new().with_draft(MEDIOCRE).with_draft(ACCEPTABLE);
    let outcome = orchestrator(drafter.clone()).generate("展示会の案内状").await.unwrap();

    assert!(outcome.accepted);
    assert_eq!(outcome.selected.attempt_index, 1);

    let requests = drafter.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].prompt, "展示会の案内状");
    assert_eq!(requests[0].temperature, 0.7);
    assert!(requests[1].prompt.starts_with("展示会の案内状"));
    assert!(requests[1].prompt.contains("文字数が不足"));
    assert_eq!(requests[1].temperature, 0.4);

    let corrections = requests[1].prompt.matches("\n- ").count();
    assert!(corrections >= 1 && corrections <= 3, "{}", requests[1].prompt);
}

#[tokio::test]
async fn test_drafter_failure_is_retried() {
    let drafter = ScriptedDrafter::new().with_failure("rate limited").with_draft(ACCEPTABLE);
    let outcome = orchestrator(drafter.clone()).generate("展示会の案内状").await.unwrap();

    assert!(outcome.accepted);
    assert_eq!(outcome.selected.attempt_index, 1);
    assert_eq!(outcome.attempts.len(), 1);
    assert_eq!(drafter.call_count(), 2);
}

#[tokio::test]
async fn test_empty_draft_counts_as_failure() {
    let drafter = ScriptedDrafter::new().with_draft("   \n").with_draft(ACCEPTABLE);
    let outcome = orchestrator(drafter).generate("展示会の案内状").await.unwrap();

    assert_eq!(outcome.attempts.len(), 1);
    assert_eq!(outcome.selected.attempt_index, 1);
}

#[tokio::test]
async fn test_final_failure_returns_prior_attempt() {
    let drafter = ScriptedDrafter::new().with_draft(MEDIOCRE).with_failure("timeout");
    let outcome = orchestrator(drafter).generate("展示会の案内状").await.unwrap();

    assert!(!outcome.accepted);
    assert_eq!(outcome.selected.attempt_index, 0);
    assert_eq!(outcome.selected.score.total, 60);
}

#[tokio::test]
async fn test_every_attempt_failing_is_an_error() {
    let drafter = ScriptedDrafter::new().with_failure("timeout").with_failure("timeout");
    let err = orchestrator(drafter).generate("展示会の案内状").await.unwrap_err();

    match err {
        GenerationError::Failed { attempts, .. } => assert_eq!(attempts, 2),
    }
}

#[tokio::test]
async fn test_budget_is_configurable() {
    let drafter = ScriptedDrafter::new()
        .with_draft(MEDIOCRE)
        .with_draft(MEDIOCRE)
        .with_draft(ACCEPTABLE);
    let config = RetryConfig::default()
        .with_max_attempts(3)
        .with_backoff(Duration::ZERO);
    let outcome = RetryOrchestrator::new(drafter, Evaluation::for_mode(Mode::Event))
        .with_config(config)
        .generate("展示会の案内状")
        .await
        .unwrap();

    assert!(outcome.accepted);
    assert_eq!(outcome.selected.attempt_index, 2);
    assert_eq!(outcome.attempts.len(), 3);
}
