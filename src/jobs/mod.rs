/// This module handles job queue operations.
mod queue;
pub use queue::*;

/// This module contains handlers for processing jobs.
mod handlers;
pub use handlers::*;

/// This module is responsible for producing jobs.
mod job_producer;
pub use job_producer::*;

/// This module defines the job structure and related operations.
mod job;
pub use job::*;

/// This module implements retry backoff strategies for job processing.
mod retry_backoff;
pub use retry_backoff::*;
