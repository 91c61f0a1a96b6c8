//! User Onboarding Service Library
//!
//! This library provides functionality for accepting user signups over HTTP
//! and completing them asynchronously through a durable job queue. It
//! includes:
//!
//! - A submission API that acknowledges signups before any work happens
//! - A Redis-backed queue with at-least-once delivery
//! - A worker engine with bounded retries and exponential backoff
//! - A queryable job record store for status polling
//!
//! # Module Structure
//!
//! - `api`: HTTP routes and controllers
//! - `config`: Configuration loaded from the environment
//! - `domain`: Workflow execution and retry resolution
//! - `init`: Startup wiring for state and workers
//! - `jobs`: Queue transport, producer, and worker handlers
//! - `logging`: Logging setup
//! - `models`: Data structures shared across layers
//! - `repositories`: Job record storage

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod init;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod repositories;

pub use models::{ApiError, AppState, DefaultAppState};
