//! The onboarding job body.
//!
//! The workflow is a fixed sequence of simulated timed stages standing in for
//! external calls: generating a welcome kit and syncing the signup to the
//! CRM. Failures are injected through [`FaultInjector`] so production runs
//! with a random transient-failure rate while tests script exact per-attempt
//! outcomes.
use std::sync::Arc;
use std::time::Duration;

use log::info;
use rand::Rng;
use tokio::time::sleep;

use crate::{
    jobs::OnboardingRequest,
    models::{WorkflowError, WorkflowStep},
};

/// Decides whether a workflow step fails on a given attempt.
pub trait FaultInjector: Send + Sync {
    fn inject(&self, step: WorkflowStep, attempt: u32) -> Result<(), WorkflowError>;
}

/// Fails each step with a fixed probability, modelling the class of
/// transient errors retries exist to absorb.
#[derive(Debug, Clone)]
pub struct RandomFaultInjector {
    failure_rate: f64,
}

impl RandomFaultInjector {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl FaultInjector for RandomFaultInjector {
    fn inject(&self, step: WorkflowStep, _attempt: u32) -> Result<(), WorkflowError> {
        if rand::thread_rng().gen::<f64>() < self.failure_rate {
            return Err(WorkflowError::StepFailed {
                step,
                reason: "simulated transient failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Never fails. Used when the failure rate is configured to zero.
#[derive(Debug, Clone, Default)]
pub struct NoFaultInjector;

impl FaultInjector for NoFaultInjector {
    fn inject(&self, _step: WorkflowStep, _attempt: u32) -> Result<(), WorkflowError> {
        Ok(())
    }
}

/// Fails the first step of every attempt listed at construction.
/// Deterministic counterpart of [`RandomFaultInjector`] for tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaultInjector {
    failing_attempts: Vec<u32>,
}

impl ScriptedFaultInjector {
    pub fn failing_on(attempts: &[u32]) -> Self {
        Self {
            failing_attempts: attempts.to_vec(),
        }
    }
}

impl FaultInjector for ScriptedFaultInjector {
    fn inject(&self, step: WorkflowStep, attempt: u32) -> Result<(), WorkflowError> {
        if step == WorkflowStep::WelcomeKit && self.failing_attempts.contains(&attempt) {
            return Err(WorkflowError::StepFailed {
                step,
                reason: format!("scripted failure on attempt {}", attempt),
            });
        }
        Ok(())
    }
}

/// Per-step simulated durations.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub welcome_kit: Duration,
    pub crm_sync: Duration,
}

pub struct OnboardingWorkflow {
    settings: WorkflowSettings,
    injector: Arc<dyn FaultInjector>,
}

impl OnboardingWorkflow {
    pub fn new(settings: WorkflowSettings, injector: Arc<dyn FaultInjector>) -> Self {
        Self { settings, injector }
    }

    /// Runs the full step sequence for one attempt.
    ///
    /// The sleeps are cooperative; a worker slot waiting on a step never
    /// blocks the runtime from driving other jobs.
    pub async fn run(
        &self,
        request: &OnboardingRequest,
        attempt: u32,
    ) -> Result<String, WorkflowError> {
        info!(
            "Onboarding started: building profile for {} (attempt {})",
            request.username, attempt
        );

        self.injector.inject(WorkflowStep::WelcomeKit, attempt)?;
        sleep(self.settings.welcome_kit).await;
        info!("Welcome kit generated for {}", request.email);

        self.injector.inject(WorkflowStep::CrmSync, attempt)?;
        sleep(self.settings.crm_sync).await;
        info!("Welcome email dispatched to {}", request.email);

        Ok(format!("Finalised onboarding for {}", request.username))
    }
}
