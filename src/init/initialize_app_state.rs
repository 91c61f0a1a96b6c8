//! Application state initialization
//!
//! This module contains functions for initializing the application state,
//! including setting up the record store, the job queue, and the workflow
//! engine.
use crate::{
    config::ServerConfig,
    domain::{FaultInjector, NoFaultInjector, OnboardingWorkflow, RandomFaultInjector, WorkflowSettings},
    jobs::{JobProducer, Queue},
    models::DefaultAppState,
    repositories::RedisOnboardingJobRepository,
    AppState,
};
use actix_web::web;
use color_eyre::{eyre, eyre::WrapErr, Result};
use log::error;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Opens a Redis connection for the record store, bounded by the configured
/// connection timeout.
async fn connect_record_store(config: &ServerConfig) -> Result<ConnectionManager> {
    let client = redis::Client::open(config.redis_url.as_str())
        .wrap_err("Failed to parse Redis URL for the record store")?;

    let connect_timeout = Duration::from_millis(config.redis_connection_timeout_ms);
    match timeout(connect_timeout, ConnectionManager::new(client)).await {
        Ok(result) => result.wrap_err_with(|| {
            format!(
                "Failed to connect to Redis for the record store at {}",
                config.redis_url
            )
        }),
        Err(_) => {
            error!("Timeout connecting to Redis at {}", config.redis_url);
            Err(eyre::eyre!(
                "Timed out after {} milliseconds while connecting to Redis at {}",
                config.redis_connection_timeout_ms,
                config.redis_url
            ))
        }
    }
}

/// Initializes application state
///
/// # Returns
///
/// * `Result<web::ThinData<DefaultAppState>>` - Initialized application state
///
/// # Errors
///
/// Returns error if:
/// - The Redis connection cannot be established
/// - Repository initialization fails
pub async fn initialize_app_state(config: &ServerConfig) -> Result<web::ThinData<DefaultAppState>> {
    let connection_manager = Arc::new(connect_record_store(config).await?);
    let job_repository = Arc::new(RedisOnboardingJobRepository::new(
        connection_manager,
        config.redis_key_prefix.clone(),
    )?);

    let queue = Queue::setup(config).await?;
    let job_producer = Arc::new(JobProducer::new(queue));

    let injector: Arc<dyn FaultInjector> = if config.step_failure_rate > 0.0 {
        Arc::new(RandomFaultInjector::new(config.step_failure_rate))
    } else {
        Arc::new(NoFaultInjector)
    };
    let workflow = Arc::new(OnboardingWorkflow::new(
        WorkflowSettings {
            welcome_kit: Duration::from_millis(config.welcome_kit_ms),
            crm_sync: Duration::from_millis(config.crm_sync_ms),
        },
        injector,
    ));

    let app_state = web::ThinData(AppState {
        job_repository,
        job_producer,
        workflow,
        max_attempts: config.max_attempts,
        backoff_unit: Duration::from_millis(config.backoff_unit_ms),
        max_backoff: Duration::from_millis(config.max_backoff_ms),
    });

    Ok(app_state)
}
