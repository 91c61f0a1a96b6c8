//! Retry state machine for onboarding attempts.
//!
//! An attempt's fate is decided here as plain data: the worker runs the job
//! body, feeds the result through [`resolve_attempt`], and acts on the
//! returned [`AttemptOutcome`]. Keeping the decision pure makes the retry
//! logic testable without queues or timers.
use std::time::Duration;

use crate::models::WorkflowError;

/// Outcome of attempt `n` of a job.
///
/// `Retry` carries the backoff delay the engine must observe before attempt
/// `n + 1`; `Exhausted` is terminal and carries the error descriptor that
/// gets recorded for pollers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Completed {
        message: String,
    },
    Retry {
        attempt: u32,
        delay: Duration,
        reason: String,
    },
    Exhausted {
        attempts: u32,
        reason: String,
    },
}

impl AttemptOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptOutcome::Retry { .. })
    }
}

/// Backoff before the attempt following failed attempt `n` (1-indexed):
/// `unit * 2^(n-1)`, capped at `max`. Recomputed from the current attempt
/// number each time, never accumulated.
pub fn backoff_delay(attempt: u32, unit: Duration, max: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1);
    if exponent >= 32 {
        return max;
    }
    unit.checked_mul(1u32 << exponent).unwrap_or(max).min(max)
}

/// Resolves attempt `attempt` (1-indexed) of a job allowed `max_attempts`
/// total attempts.
pub fn resolve_attempt(
    result: Result<String, WorkflowError>,
    attempt: u32,
    max_attempts: u32,
    backoff_unit: Duration,
    max_backoff: Duration,
) -> AttemptOutcome {
    match result {
        Ok(message) => AttemptOutcome::Completed { message },
        Err(error) if attempt < max_attempts => AttemptOutcome::Retry {
            attempt,
            delay: backoff_delay(attempt, backoff_unit, max_backoff),
            reason: error.to_string(),
        },
        Err(error) => AttemptOutcome::Exhausted {
            attempts: attempt,
            reason: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkflowStep;

    const UNIT: Duration = Duration::from_secs(1);
    const MAX: Duration = Duration::from_secs(300);

    fn step_failure() -> Result<String, WorkflowError> {
        Err(WorkflowError::StepFailed {
            step: WorkflowStep::WelcomeKit,
            reason: "transient".to_string(),
        })
    }

    #[test]
    fn test_success_completes_on_any_attempt() {
        let outcome = resolve_attempt(Ok("done".to_string()), 3, 3, UNIT, MAX);
        assert_eq!(
            outcome,
            AttemptOutcome::Completed {
                message: "done".to_string()
            }
        );
    }

    #[test]
    fn test_failure_with_attempts_left_retries() {
        let outcome = resolve_attempt(step_failure(), 1, 3, UNIT, MAX);
        match outcome {
            AttemptOutcome::Retry { attempt, delay, .. } => {
                assert_eq!(attempt, 1);
                assert_eq!(delay, Duration::from_secs(1));
            }
            other => panic!("expected retry, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_on_last_attempt_exhausts() {
        let outcome = resolve_attempt(step_failure(), 3, 3, UNIT, MAX);
        match outcome {
            AttemptOutcome::Exhausted { attempts, reason } => {
                assert_eq!(attempts, 3);
                assert!(reason.contains("welcome_kit"));
            }
            other => panic!("expected exhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        // Attempt n's failure waits 2^(n-1) units before attempt n+1.
        assert_eq!(backoff_delay(1, UNIT, MAX), Duration::from_secs(1));
        assert_eq!(backoff_delay(2, UNIT, MAX), Duration::from_secs(2));
        assert_eq!(backoff_delay(3, UNIT, MAX), Duration::from_secs(4));
        assert_eq!(backoff_delay(4, UNIT, MAX), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_delay(30, UNIT, MAX), MAX);
        assert_eq!(backoff_delay(63, UNIT, MAX), MAX);
        assert_eq!(backoff_delay(200, UNIT, MAX), MAX);
    }

    #[test]
    fn test_terminal_classification() {
        assert!(AttemptOutcome::Completed {
            message: String::new()
        }
        .is_terminal());
        assert!(AttemptOutcome::Exhausted {
            attempts: 3,
            reason: String::new()
        }
        .is_terminal());
        assert!(!AttemptOutcome::Retry {
            attempt: 1,
            delay: UNIT,
            reason: String::new()
        }
        .is_terminal());
    }
}
