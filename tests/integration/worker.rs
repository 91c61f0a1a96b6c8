//! Drives full job lifecycles through the worker path: submit, then execute
//! attempts the way the retry layer would, checking the record after each
//! step.
use std::sync::Arc;
use std::time::Duration;

use onboarding_service::{
    api::controllers::onboarding,
    domain::{AttemptOutcome, ScriptedFaultInjector},
    jobs::handle_request,
    models::{JobOutcome, JobStatus, SubmitOnboardingRequest},
    repositories::Repository,
};

use crate::common::{instant_state, test_state, TestState};

async fn submit(state: &actix_web::web::ThinData<TestState>) -> String {
    onboarding::submit_onboarding(
        SubmitOnboardingRequest {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        },
        state.clone(),
    )
    .await
    .unwrap();

    state.job_producer.produced().await[0].job_id.clone()
}

/// Runs attempts in sequence until a terminal outcome, the way the retry
/// layer re-dispatches after each transient failure.
async fn drive_to_completion(
    state: &actix_web::web::ThinData<TestState>,
    job_id: &str,
) -> AttemptOutcome {
    let request = state.job_producer.produced().await[0].clone();
    assert_eq!(request.job_id, job_id);

    let mut attempt = 1;
    loop {
        let outcome = handle_request(&request, attempt, state).await.unwrap();
        if outcome.is_terminal() {
            return outcome;
        }
        attempt += 1;
    }
}

#[tokio::test]
async fn test_job_succeeds_first_try() {
    let state = instant_state(3);
    let job_id = submit(&state).await;

    let outcome = drive_to_completion(&state, &job_id).await;
    assert!(matches!(outcome, AttemptOutcome::Completed { .. }));

    let record = state.job_repository.get_by_id(job_id).await.unwrap();
    assert_eq!(record.status, JobStatus::Succeeded);
    assert_eq!(record.attempt_count, 1);
    match record.result {
        Some(JobOutcome::Completed { message }) => {
            assert_eq!(message, "Finalised onboarding for ada");
        }
        other => panic!("expected completed outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_job_succeeds_after_transient_failures() {
    let state = test_state(Arc::new(ScriptedFaultInjector::failing_on(&[1, 2])), 3);
    let job_id = submit(&state).await;

    let outcome = drive_to_completion(&state, &job_id).await;
    assert!(matches!(outcome, AttemptOutcome::Completed { .. }));

    let record = state.job_repository.get_by_id(job_id).await.unwrap();
    assert_eq!(record.status, JobStatus::Succeeded);
    // Two failed attempts plus the successful third.
    assert_eq!(record.attempt_count, 3);
}

#[tokio::test]
async fn test_job_fails_after_exhausting_attempts() {
    let state = test_state(Arc::new(ScriptedFaultInjector::failing_on(&[1, 2, 3])), 3);
    let job_id = submit(&state).await;

    let outcome = drive_to_completion(&state, &job_id).await;
    match &outcome {
        AttemptOutcome::Exhausted { attempts, .. } => assert_eq!(*attempts, 3),
        other => panic!("expected exhaustion, got {:?}", other),
    }

    let record = state.job_repository.get_by_id(job_id).await.unwrap();
    assert_eq!(record.status, JobStatus::Failed);
    assert_eq!(record.attempt_count, 3);
    match record.result {
        Some(JobOutcome::Exhausted { attempts, reason }) => {
            assert_eq!(attempts, 3);
            assert!(reason.contains("ada (ada@example.com)"));
        }
        other => panic!("expected exhausted outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retry_delays_double_per_attempt() {
    let state = test_state(Arc::new(ScriptedFaultInjector::failing_on(&[1, 2])), 3);
    let job_id = submit(&state).await;
    let request = state.job_producer.produced().await[0].clone();
    assert_eq!(request.job_id, job_id);

    // backoff_unit is 1ms in the fixture, so delays run 1ms, 2ms.
    let first = handle_request(&request, 1, &state).await.unwrap();
    match first {
        AttemptOutcome::Retry { attempt, delay, .. } => {
            assert_eq!(attempt, 1);
            assert_eq!(delay, Duration::from_millis(1));
        }
        other => panic!("expected retry, got {:?}", other),
    }

    let second = handle_request(&request, 2, &state).await.unwrap();
    match second {
        AttemptOutcome::Retry { attempt, delay, .. } => {
            assert_eq!(attempt, 2);
            assert_eq!(delay, Duration::from_millis(2));
        }
        other => panic!("expected retry, got {:?}", other),
    }
}

#[tokio::test]
async fn test_status_is_observable_between_attempts() {
    let state = test_state(Arc::new(ScriptedFaultInjector::failing_on(&[1])), 3);
    let job_id = submit(&state).await;
    let request = state.job_producer.produced().await[0].clone();

    // Pending until a worker picks the job up.
    let record = state.job_repository.get_by_id(job_id.clone()).await.unwrap();
    assert_eq!(record.status, JobStatus::Pending);

    // After a failed attempt the job is Started, mid-retry, with no result.
    handle_request(&request, 1, &state).await.unwrap();
    let record = state.job_repository.get_by_id(job_id.clone()).await.unwrap();
    assert_eq!(record.status, JobStatus::Started);
    assert!(record.result.is_none());

    // Attempt 2 succeeds; the count stops there and no third attempt runs.
    let outcome = handle_request(&request, 2, &state).await.unwrap();
    assert!(outcome.is_terminal());
    let record = state.job_repository.get_by_id(job_id).await.unwrap();
    assert_eq!(record.status, JobStatus::Succeeded);
    assert_eq!(record.attempt_count, 2);
}
