//! # Onboarding Service
//!
//! An asynchronous user-onboarding service: signups are accepted over HTTP,
//! queued durably, and completed in the background with bounded retries.
//!
//! ## Features
//!
//! - Immediate acknowledgement of submissions
//! - At-least-once job delivery over Redis
//! - Exponential backoff between retry attempts
//! - Status polling against a job record store
//!
//! ## Usage
//!
//! ```bash
//! cargo run
//! ```

use std::sync::Arc;

use actix_web::{
    middleware::{self, Logger},
    web::{self},
    App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;

use onboarding_service::{
    api,
    config::ServerConfig,
    init::{initialize_app_state, initialize_workers},
    logging::setup_logging,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize error reporting with eyre
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging();

    let config = Arc::new(ServerConfig::from_env());

    let app_state = initialize_app_state(&config).await?;

    // Setup workers for processing jobs
    initialize_workers(app_state.clone()).await?;

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .service(web::scope("/api/v1").configure(api::routes::configure_routes))
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
