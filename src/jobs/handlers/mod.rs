use std::sync::Arc;

use apalis::prelude::Error;
use eyre::Report;
use log::{error, info};

use crate::domain::AttemptOutcome;

mod onboarding_handler;
pub use onboarding_handler::*;

/// Translates a resolved attempt into the worker's acknowledgement protocol.
///
/// `Completed` and `Exhausted` are terminal: the record is already written,
/// so the message is acknowledged (`Ok` / `Abort`). `Retry` surfaces as
/// `Error::Failed` so the retry layer re-dispatches after backoff. A store
/// fault also maps to `Failed`: nothing was recorded, so redelivery is the
/// safe path.
pub fn into_worker_result(
    outcome: Result<AttemptOutcome, Report>,
    job_id: &str,
) -> Result<(), Error> {
    match outcome {
        Ok(AttemptOutcome::Completed { .. }) => {
            info!("Onboarding job {} handled successfully", job_id);
            Ok(())
        }
        Ok(AttemptOutcome::Retry {
            attempt,
            delay,
            reason,
        }) => {
            info!(
                "Onboarding job {} failed on attempt {} ({}), retrying in {:?}",
                job_id, attempt, reason, delay
            );
            Err(Error::Failed(Arc::new(reason.into())))
        }
        Ok(AttemptOutcome::Exhausted { attempts, reason }) => {
            info!(
                "Onboarding job {} exhausted {} attempts ({}), outcome recorded",
                job_id, attempts, reason
            );
            Err(Error::Abort(Arc::new(reason.into())))
        }
        Err(report) => {
            error!("Onboarding job {} hit a store fault: {:?}", job_id, report);
            Err(Error::Failed(Arc::new(report.to_string().into())))
        }
    }
}
