use std::sync::Arc;
use std::time::Duration;

use crate::{
    domain::OnboardingWorkflow,
    jobs::{JobProducer, JobProducerTrait},
    repositories::{OnboardingJobRepository, RedisOnboardingJobRepository},
};

/// Shared state handed to HTTP controllers and queue workers.
///
/// Generic over the job producer and the job record store so tests can swap
/// in mocks and the in-memory repository.
pub struct AppState<J = JobProducer, R = RedisOnboardingJobRepository>
where
    J: JobProducerTrait,
    R: OnboardingJobRepository,
{
    pub job_repository: Arc<R>,
    pub job_producer: Arc<J>,
    pub workflow: Arc<OnboardingWorkflow>,
    pub max_attempts: u32,
    pub backoff_unit: Duration,
    pub max_backoff: Duration,
}

pub type DefaultAppState = AppState<JobProducer, RedisOnboardingJobRepository>;

impl<J: JobProducerTrait, R: OnboardingJobRepository> Clone for AppState<J, R> {
    fn clone(&self) -> Self {
        Self {
            job_repository: Arc::clone(&self.job_repository),
            job_producer: Arc::clone(&self.job_producer),
            workflow: Arc::clone(&self.workflow),
            max_attempts: self.max_attempts,
            backoff_unit: self.backoff_unit,
            max_backoff: self.max_backoff,
        }
    }
}

impl<J: JobProducerTrait, R: OnboardingJobRepository> AppState<J, R> {
    pub fn job_repository(&self) -> Arc<R> {
        self.job_repository.clone()
    }

    pub fn job_producer(&self) -> Arc<J> {
        self.job_producer.clone()
    }
}
