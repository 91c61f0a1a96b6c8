//! Retry policy with exponential backoff for the onboarding worker.
//!
//! The policy retries a failed invocation after `backoff_unit * 2^(n-1)`
//! where `n` is the attempt that just failed, up to `max_attempts` total
//! attempts. The wait is a cooperative sleep inside the retry layer, so a
//! job in backoff does not stall the worker's other slots. `Error::Abort`
//! is never retried; it is the handler's signal that a terminal outcome has
//! already been recorded.
use apalis::prelude::*;
use std::time::Duration;
use tokio::time::{sleep, Sleep};
use tower::retry::Policy;

use crate::domain::backoff_delay;

type Req<T, Ctx> = Request<T, Ctx>;
type Err = Error;

#[derive(Clone, Debug)]
pub struct BackoffRetryPolicy {
    /// Total attempts allowed, including the first.
    pub max_attempts: u32,
    /// One backoff time-unit; attempt n's failure waits `unit * 2^(n-1)`.
    pub backoff_unit: Duration,
    /// Upper bound on any single wait.
    pub max_backoff: Duration,
}

impl BackoffRetryPolicy {
    pub fn new(max_attempts: u32, backoff_unit: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
            max_backoff,
        }
    }

    fn backoff_duration(&self, attempt: u32) -> Duration {
        backoff_delay(attempt, self.backoff_unit, self.max_backoff)
    }
}

impl<T, Res, Ctx> Policy<Req<T, Ctx>, Res, Err> for BackoffRetryPolicy
where
    T: Clone,
    Ctx: Clone,
{
    type Future = Sleep;

    fn retry(
        &mut self,
        req: &mut Req<T, Ctx>,
        result: &mut Result<Res, Err>,
    ) -> Option<Self::Future> {
        // One dispatch has happened per increment, so this is the 1-indexed
        // number of the attempt that just resolved.
        let attempt = req.parts.attempt.current().max(1) as u32;

        match result {
            Ok(_) => None,
            Err(Error::Abort(_)) => None,
            Err(_) if attempt < self.max_attempts => {
                Some(sleep(self.backoff_duration(attempt)))
            }
            Err(_) => None,
        }
    }

    fn clone_request(&mut self, req: &Req<T, Ctx>) -> Option<Req<T, Ctx>> {
        let req = req.clone();
        req.parts.attempt.increment();
        Some(req)
    }
}
