use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Steps of the simulated onboarding workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowStep {
    WelcomeKit,
    CrmSync,
}

/// Failure raised by the job body. Always transient from the engine's point
/// of view; whether it is retried depends on the attempts remaining.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum WorkflowError {
    #[error("step {step} failed: {reason}")]
    StepFailed { step: WorkflowStep, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failed_display() {
        let error = WorkflowError::StepFailed {
            step: WorkflowStep::CrmSync,
            reason: "upstream timeout".to_string(),
        };
        assert_eq!(error.to_string(), "step crm_sync failed: upstream timeout");
    }
}
