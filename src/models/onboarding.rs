//! Data model for onboarding jobs.
//!
//! An onboarding job is created in `Pending` state when a signup is accepted,
//! moves to `Started` every time a worker picks up an attempt, and ends in one
//! of the terminal states. The stored record is the single source of truth for
//! pollers.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of an onboarding job.
///
/// Transitions are forward-only: `Pending -> Started -> {Succeeded, Failed}`,
/// with `Started` re-entered on every retry attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Started,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// Terminal result of an onboarding job.
///
/// Exhausting retries is a normal, recorded outcome rather than a worker
/// crash; pollers read it back like any other result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobOutcome {
    Completed { message: String },
    Exhausted { attempts: u32, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OnboardingJobModel {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Set to `n` at the start of attempt `n`; never exceeds `max_attempts`.
    pub attempt_count: u32,
    pub max_attempts: u32,
    pub status: JobStatus,
    /// Present only once `status` is terminal.
    pub result: Option<JobOutcome>,
    pub created_at: String,
    pub updated_at: String,
}

impl OnboardingJobModel {
    pub fn new(username: impl Into<String>, email: impl Into<String>, max_attempts: u32) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            attempt_count: 0,
            max_attempts,
            status: JobStatus::Pending,
            result: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Request body accepted by the submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitOnboardingRequest {
    pub username: String,
    pub email: String,
}

/// Response returned by the submission endpoint alongside `202 Accepted`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitOnboardingResponse {
    pub job_id: String,
}

/// Poller-facing view of a job record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnboardingJobResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub attempt_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(nullable = false)]
    pub result: Option<JobOutcome>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OnboardingJobModel> for OnboardingJobResponse {
    fn from(model: OnboardingJobModel) -> Self {
        let terminal = model.status.is_terminal();
        Self {
            job_id: model.id,
            status: model.status,
            attempt_count: model.attempt_count,
            result: model.result.filter(|_| terminal),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_starts_pending() {
        let model = OnboardingJobModel::new("ada", "ada@example.com", 3);

        assert_eq!(model.status, JobStatus::Pending);
        assert_eq!(model.attempt_count, 0);
        assert_eq!(model.max_attempts, 3);
        assert!(model.result.is_none());
        assert!(!model.id.is_empty());
    }

    #[test]
    fn test_new_models_get_distinct_ids() {
        let a = OnboardingJobModel::new("ada", "ada@example.com", 3);
        let b = OnboardingJobModel::new("ada", "ada@example.com", 3);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Started.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_response_hides_result_for_non_terminal_status() {
        let mut model = OnboardingJobModel::new("ada", "ada@example.com", 3);
        model.status = JobStatus::Started;
        model.result = Some(JobOutcome::Completed {
            message: "should not leak".to_string(),
        });

        let response: OnboardingJobResponse = model.into();
        assert!(response.result.is_none());
    }

    #[test]
    fn test_response_exposes_result_for_terminal_status() {
        let mut model = OnboardingJobModel::new("ada", "ada@example.com", 3);
        model.status = JobStatus::Failed;
        model.attempt_count = 3;
        model.result = Some(JobOutcome::Exhausted {
            attempts: 3,
            reason: "crm sync kept failing".to_string(),
        });

        let response: OnboardingJobResponse = model.into();
        assert_eq!(
            response.result,
            Some(JobOutcome::Exhausted {
                attempts: 3,
                reason: "crm sync kept failing".to_string(),
            })
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::Succeeded).unwrap();
        assert_eq!(json, "\"succeeded\"");
    }
}
