//! Property-based tests for the retry backoff schedule.
//!
//! These tests verify the behavior of the `backoff_delay` function across the
//! whole attempt range: doubling growth while under the cap, the cap as an
//! absolute bound, and monotonicity of the schedule.
//!
//!   Refer to `src/domain/attempt.rs` for more details.
use std::time::Duration;

use onboarding_service::domain::{backoff_delay, resolve_attempt, AttemptOutcome};
use proptest::{prelude::*, test_runner::Config};

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// Below the cap, each attempt's delay is exactly double the previous one.
  #[test]
  fn prop_backoff_doubles_below_cap(
    attempt in 1u32..20,
    unit_ms in 1u64..1000
  ) {
      let unit = Duration::from_millis(unit_ms);
      let max = Duration::from_secs(u64::MAX / 1_000_000);

      let current = backoff_delay(attempt, unit, max);
      let next = backoff_delay(attempt + 1, unit, max);
      prop_assert_eq!(next, current * 2);
  }

  /// The configured cap bounds every delay, whatever the attempt number.
  #[test]
  fn prop_backoff_never_exceeds_cap(
    attempt in 1u32..10_000,
    unit_ms in 1u64..10_000,
    max_ms in 1u64..1_000_000
  ) {
      let unit = Duration::from_millis(unit_ms);
      let max = Duration::from_millis(max_ms);

      prop_assert!(backoff_delay(attempt, unit, max) <= max);
  }

  /// Delays never shrink as attempts accumulate.
  #[test]
  fn prop_backoff_is_monotonic(
    attempt in 1u32..200,
    unit_ms in 1u64..1000,
    max_ms in 1u64..1_000_000
  ) {
      let unit = Duration::from_millis(unit_ms);
      let max = Duration::from_millis(max_ms);

      prop_assert!(backoff_delay(attempt + 1, unit, max) >= backoff_delay(attempt, unit, max));
  }

  /// The first delay is always exactly one unit (or the cap, if smaller).
  #[test]
  fn prop_first_delay_is_one_unit(
    unit_ms in 1u64..1_000_000,
    max_ms in 1u64..1_000_000
  ) {
      let unit = Duration::from_millis(unit_ms);
      let max = Duration::from_millis(max_ms);

      prop_assert_eq!(backoff_delay(1, unit, max), unit.min(max));
  }

  /// A failed attempt retries exactly when attempts remain; the attempt count
  /// reported on exhaustion equals the configured maximum.
  #[test]
  fn prop_resolution_respects_attempt_bound(
    attempt in 1u32..50,
    max_attempts in 1u32..50
  ) {
      let attempt = attempt.min(max_attempts);
      let failure = Err(onboarding_service::models::WorkflowError::StepFailed {
          step: onboarding_service::models::WorkflowStep::WelcomeKit,
          reason: "transient".to_string(),
      });
      let outcome = resolve_attempt(
          failure,
          attempt,
          max_attempts,
          Duration::from_millis(1),
          Duration::from_secs(300),
      );

      if attempt < max_attempts {
          prop_assert!(
              matches!(outcome, AttemptOutcome::Retry { .. }),
              "expected AttemptOutcome::Retry, got {:?}",
              outcome
          );
      } else {
          prop_assert!(
              matches!(outcome, AttemptOutcome::Exhausted { attempts, .. } if attempts == max_attempts),
              "expected AttemptOutcome::Exhausted with attempts == max_attempts, got {:?}",
              outcome
          );
      }
  }
}
