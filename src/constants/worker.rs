use std::time::Duration;

pub const ONBOARDING_WORKER: &str = "onboarding_worker";

/// Concurrent job slots per worker process.
pub const DEFAULT_CONCURRENCY: usize = 2;

pub const DEFAULT_RATE_LIMIT: u64 = 20;
pub const DEFAULT_RATE_LIMIT_DURATION: Duration = Duration::from_secs(1);

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_UNIT_MS: u64 = 1000;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 300_000;

pub const DEFAULT_WELCOME_KIT_MS: u64 = 4000;
pub const DEFAULT_CRM_SYNC_MS: u64 = 3000;
pub const DEFAULT_STEP_FAILURE_RATE: f64 = 0.2;
