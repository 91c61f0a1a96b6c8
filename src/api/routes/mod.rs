//! # API Routes Module
//!
//! Configures HTTP routes for the onboarding service API.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoints
//! * `/onboardings` - Onboarding job endpoints

pub mod health;
pub mod onboarding;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init).configure(onboarding::init);
}
