//! Job message structures carried over the queue transport.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

/// Common message envelope. `message_id` identifies the delivery, not the
/// job; redeliveries of the same job reuse `data.job_id`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job<T> {
    pub message_id: String,
    pub version: String,
    pub timestamp: String,
    pub job_type: JobType,
    pub data: T,
}

impl<T> Job<T> {
    pub fn new(job_type: JobType, data: T) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            version: "1.0".to_string(),
            timestamp: Utc::now().timestamp().to_string(),
            job_type,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobType {
    OnboardingWorkflow,
}

/// Payload of an onboarding invocation: the record id plus the immutable
/// signup fields the job body needs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OnboardingRequest {
    pub job_id: String,
    pub username: String,
    pub email: String,
}

impl OnboardingRequest {
    pub fn new(
        job_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}
