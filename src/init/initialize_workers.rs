//! # Workers
//! Initialise and starts the workers for the application

use actix_web::web::ThinData;
use apalis::{layers::ErrorHandlingLayer, prelude::*};
use eyre::Result;
use log::{error, info};
use std::time::Duration;
use tokio::signal::unix::SignalKind;

use crate::{
    constants::{
        DEFAULT_CONCURRENCY, DEFAULT_RATE_LIMIT, DEFAULT_RATE_LIMIT_DURATION, ONBOARDING_WORKER,
    },
    jobs::{onboarding_handler, BackoffRetryPolicy},
    models::DefaultAppState,
};

pub async fn initialize_workers(app_state: ThinData<DefaultAppState>) -> Result<()> {
    let queue = app_state.job_producer.get_queue().await?;

    let retry_policy = BackoffRetryPolicy::new(
        app_state.max_attempts,
        app_state.backoff_unit,
        app_state.max_backoff,
    );

    let onboarding_queue_worker = WorkerBuilder::new(ONBOARDING_WORKER)
        .layer(ErrorHandlingLayer::new())
        .enable_tracing()
        .catch_panic()
        .rate_limit(DEFAULT_RATE_LIMIT, DEFAULT_RATE_LIMIT_DURATION)
        .retry(retry_policy)
        .concurrency(DEFAULT_CONCURRENCY)
        .data(app_state.clone())
        .backend(queue.onboarding_queue.clone())
        .build_fn(onboarding_handler);

    let monitor_future = Monitor::new()
        .register(onboarding_queue_worker)
        .on_event(monitor_handle_event)
        .shutdown_timeout(Duration::from_millis(5000))
        .run_with_signal(async {
            let mut sigint = tokio::signal::unix::signal(SignalKind::interrupt())
                .expect("Failed to create SIGINT signal");
            let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())
                .expect("Failed to create SIGTERM signal");

            info!("Monitor started");

            tokio::select! {
                _ = sigint.recv() => info!("Received SIGINT."),
                _ = sigterm.recv() => info!("Received SIGTERM."),
            };

            info!("Monitor shutting down");

            Ok(())
        });
    tokio::spawn(async move {
        if let Err(e) = monitor_future.await {
            error!("Monitor error: {}", e);
        }
    });
    info!("Workers registered");
    Ok(())
}

fn monitor_handle_event(e: Worker<Event>) {
    let worker_id = e.id();
    match e.inner() {
        Event::Engage(task_id) => {
            info!("Worker [{worker_id}] got a job with id: {task_id}");
        }
        Event::Error(e) => {
            error!("Worker [{worker_id}] encountered an error: {e}");
        }
        Event::Exit => {
            info!("Worker [{worker_id}] exited");
        }
        Event::Idle => {
            info!("Worker [{worker_id}] is idle");
        }
        Event::Start => {
            info!("Worker [{worker_id}] started");
        }
        Event::Stop => {
            info!("Worker [{worker_id}] stopped");
        }
        _ => {}
    }
}
