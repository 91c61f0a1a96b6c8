/// Configuration for the server, the queue transport, and the worker engine.
use std::env;

use crate::constants::{
    DEFAULT_BACKOFF_UNIT_MS, DEFAULT_CRM_SYNC_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF_MS,
    DEFAULT_STEP_FAILURE_RATE, DEFAULT_WELCOME_KIT_MS,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
    /// The URL for the Redis instance backing queue and record store.
    pub redis_url: String,
    /// Timeout for establishing Redis connections, in milliseconds.
    pub redis_connection_timeout_ms: u64,
    /// Prefix applied to every record-store key.
    pub redis_key_prefix: String,
    /// Total execution attempts per job, including the first.
    pub max_attempts: u32,
    /// One backoff time-unit in milliseconds; attempt n's failure waits
    /// `unit * 2^(n-1)` before attempt n+1.
    pub backoff_unit_ms: u64,
    /// Upper bound on a single backoff wait, in milliseconds.
    pub max_backoff_ms: u64,
    /// Simulated duration of the welcome-kit step, in milliseconds.
    pub welcome_kit_ms: u64,
    /// Simulated duration of the CRM-sync step, in milliseconds.
    pub crm_sync_ms: u64,
    /// Probability in [0, 1] that a workflow step fails transiently.
    pub step_failure_rate: f64,
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `REDIS_URL` is not set, or if `WORKER_MAX_ATTEMPTS` is
    /// configured as `0` — a job that may never execute is invalid
    /// configuration and is rejected at startup, not at runtime.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `APP_PORT` defaults to `8080`.
    /// - `REDIS_CONNECTION_TIMEOUT_MS` defaults to `10000`.
    /// - `REDIS_KEY_PREFIX` defaults to `"onboarding"`.
    /// - `WORKER_MAX_ATTEMPTS` defaults to `3`.
    /// - `BACKOFF_UNIT_MS` defaults to `1000`.
    /// - `MAX_BACKOFF_MS` defaults to `300000`.
    /// - `WELCOME_KIT_MS` defaults to `4000`, `CRM_SYNC_MS` to `3000`.
    /// - `STEP_FAILURE_RATE` defaults to `0.2`.
    pub fn from_env() -> Self {
        let max_attempts = env::var("WORKER_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        if max_attempts == 0 {
            panic!("WORKER_MAX_ATTEMPTS must be at least 1");
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            redis_url: env::var("REDIS_URL").expect("REDIS_URL must be set"),
            redis_connection_timeout_ms: env::var("REDIS_CONNECTION_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10000),
            redis_key_prefix: env::var("REDIS_KEY_PREFIX")
                .unwrap_or_else(|_| "onboarding".to_string()),
            max_attempts,
            backoff_unit_ms: env::var("BACKOFF_UNIT_MS")
                .unwrap_or_else(|_| DEFAULT_BACKOFF_UNIT_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_BACKOFF_UNIT_MS),
            max_backoff_ms: env::var("MAX_BACKOFF_MS")
                .unwrap_or_else(|_| DEFAULT_MAX_BACKOFF_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_BACKOFF_MS),
            welcome_kit_ms: env::var("WELCOME_KIT_MS")
                .unwrap_or_else(|_| DEFAULT_WELCOME_KIT_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_WELCOME_KIT_MS),
            crm_sync_ms: env::var("CRM_SYNC_MS")
                .unwrap_or_else(|_| DEFAULT_CRM_SYNC_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_CRM_SYNC_MS),
            step_failure_rate: env::var("STEP_FAILURE_RATE")
                .unwrap_or_else(|_| DEFAULT_STEP_FAILURE_RATE.to_string())
                .parse()
                .unwrap_or(DEFAULT_STEP_FAILURE_RATE),
        }
    }
}
