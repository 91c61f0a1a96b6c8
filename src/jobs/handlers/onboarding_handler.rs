//! Onboarding worker implementation.
//!
//! Per attempt: record `Started` with the attempt number, run the workflow
//! body, resolve the outcome through the retry state machine, and write
//! terminal records before the message is acknowledged. Exhausting retries
//! is an ordinary recorded outcome, never a worker crash.
use actix_web::web::ThinData;
use apalis::prelude::{Attempt, Data, *};
use eyre::{Report, Result};
use log::info;

use crate::{
    domain::{resolve_attempt, AttemptOutcome},
    jobs::{into_worker_result, Job, JobProducerTrait, OnboardingRequest},
    models::{AppState, DefaultAppState, JobOutcome, JobStatus},
    repositories::OnboardingJobRepository,
};

pub async fn onboarding_handler(
    job: Job<OnboardingRequest>,
    state: Data<ThinData<DefaultAppState>>,
    attempt: Attempt,
) -> Result<(), Error> {
    info!("Handling onboarding job: {:?}", job.data);

    // The retry layer bumps the shared counter once per dispatch, so this
    // is the 1-indexed attempt number.
    let attempt_number = (attempt.current() as u32).max(1);
    let job_id = job.data.job_id.clone();

    let outcome = handle_request(&job.data, attempt_number, &state).await;

    into_worker_result(outcome, &job_id)
}

/// Executes one attempt against the given state. Returns `Err` only for
/// store faults; job-level failures come back as data.
pub async fn handle_request<J, R>(
    request: &OnboardingRequest,
    attempt: u32,
    state: &AppState<J, R>,
) -> Result<AttemptOutcome, Report>
where
    J: JobProducerTrait,
    R: OnboardingJobRepository,
{
    let record = state
        .job_repository
        .get_by_id(request.job_id.clone())
        .await?;

    // At-least-once delivery permits duplicates after a worker crash; a
    // terminal record means the job is already resolved.
    if record.status.is_terminal() {
        info!(
            "Onboarding job {} already resolved, acknowledging duplicate delivery",
            request.job_id
        );
        return Ok(AttemptOutcome::Completed {
            message: "already resolved".to_string(),
        });
    }

    state
        .job_repository
        .mark_started(&request.job_id, attempt)
        .await?;

    let run = state.workflow.run(request, attempt).await;
    let outcome = resolve_attempt(
        run,
        attempt,
        state.max_attempts,
        state.backoff_unit,
        state.max_backoff,
    );

    match &outcome {
        AttemptOutcome::Completed { message } => {
            state
                .job_repository
                .finalize(
                    &request.job_id,
                    JobStatus::Succeeded,
                    JobOutcome::Completed {
                        message: message.clone(),
                    },
                )
                .await?;
        }
        AttemptOutcome::Exhausted { attempts, reason } => {
            state
                .job_repository
                .finalize(
                    &request.job_id,
                    JobStatus::Failed,
                    JobOutcome::Exhausted {
                        attempts: *attempts,
                        reason: format!(
                            "onboarding for {} ({}) failed: {}",
                            request.username, request.email, reason
                        ),
                    },
                )
                .await?;
        }
        AttemptOutcome::Retry { .. } => {}
    }

    Ok(outcome)
}
