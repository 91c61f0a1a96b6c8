//! Shared fixtures for the integration tests.
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use tokio::sync::Mutex;

use onboarding_service::{
    domain::{FaultInjector, NoFaultInjector, OnboardingWorkflow, WorkflowSettings},
    jobs::{JobProducerError, JobProducerTrait, OnboardingRequest},
    repositories::InMemoryOnboardingJobRepository,
    AppState,
};

/// Producer that records every enqueued request instead of touching Redis.
#[derive(Debug, Default)]
pub struct CapturingJobProducer {
    produced: Mutex<Vec<OnboardingRequest>>,
}

impl CapturingJobProducer {
    pub async fn produced(&self) -> Vec<OnboardingRequest> {
        self.produced.lock().await.clone()
    }
}

#[async_trait]
impl JobProducerTrait for CapturingJobProducer {
    async fn produce_onboarding_job(
        &self,
        onboarding_job: OnboardingRequest,
        _scheduled_on: Option<i64>,
    ) -> Result<(), JobProducerError> {
        self.produced.lock().await.push(onboarding_job);
        Ok(())
    }
}

pub type TestState = AppState<CapturingJobProducer, InMemoryOnboardingJobRepository>;

pub fn test_state(injector: Arc<dyn FaultInjector>, max_attempts: u32) -> web::ThinData<TestState> {
    web::ThinData(AppState {
        job_repository: Arc::new(InMemoryOnboardingJobRepository::new()),
        job_producer: Arc::new(CapturingJobProducer::default()),
        workflow: Arc::new(OnboardingWorkflow::new(
            WorkflowSettings {
                welcome_kit: Duration::ZERO,
                crm_sync: Duration::ZERO,
            },
            injector,
        )),
        max_attempts,
        backoff_unit: Duration::from_millis(1),
        max_backoff: Duration::from_millis(50),
    })
}

pub fn instant_state(max_attempts: u32) -> web::ThinData<TestState> {
    test_state(Arc::new(NoFaultInjector), max_attempts)
}
