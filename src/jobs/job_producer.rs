//! Submission gateway onto the queue transport.
//!
//! Publishes exactly one message per submission and returns without waiting
//! for execution; only transport unavailability is an error here.
use apalis::prelude::Storage;
use apalis_redis::RedisError;
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::ApiError;

use super::{Job, JobType, OnboardingRequest, Queue};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error, Serialize)]
pub enum JobProducerError {
    #[error("Queue error: {0}")]
    QueueError(String),
}

impl From<RedisError> for JobProducerError {
    fn from(_: RedisError) -> Self {
        JobProducerError::QueueError("Queue error".to_string())
    }
}

impl From<JobProducerError> for ApiError {
    fn from(error: JobProducerError) -> Self {
        ApiError::ServiceUnavailable(error.to_string())
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait JobProducerTrait: Send + Sync {
    /// Enqueues one onboarding invocation, optionally scheduled for a later
    /// unix timestamp.
    async fn produce_onboarding_job(
        &self,
        onboarding_job: OnboardingRequest,
        scheduled_on: Option<i64>,
    ) -> Result<(), JobProducerError>;
}

#[derive(Debug)]
pub struct JobProducer {
    queue: Mutex<Queue>,
}

impl Clone for JobProducer {
    fn clone(&self) -> Self {
        let queue = self
            .queue
            .try_lock()
            .expect("Failed to lock queue for cloning")
            .clone();

        Self {
            queue: Mutex::new(queue),
        }
    }
}

impl JobProducer {
    pub fn new(queue: Queue) -> Self {
        Self {
            queue: Mutex::new(queue),
        }
    }

    pub async fn get_queue(&self) -> Result<Queue, JobProducerError> {
        let queue = self.queue.lock().await;

        Ok(queue.clone())
    }
}

#[async_trait]
impl JobProducerTrait for JobProducer {
    async fn produce_onboarding_job(
        &self,
        onboarding_job: OnboardingRequest,
        scheduled_on: Option<i64>,
    ) -> Result<(), JobProducerError> {
        info!("Producing onboarding job: {:?}", onboarding_job);
        let mut queue = self.queue.lock().await;
        let job = Job::new(JobType::OnboardingWorkflow, onboarding_job);

        match scheduled_on {
            Some(on) => {
                queue.onboarding_queue.schedule(job, on).await?;
            }
            None => {
                queue.onboarding_queue.push(job).await?;
            }
        }
        info!("Onboarding job produced successfully");

        Ok(())
    }
}
