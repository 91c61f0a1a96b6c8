//! Startup wiring: application state and worker initialization.
mod initialize_app_state;
pub use initialize_app_state::*;

mod initialize_workers;
pub use initialize_workers::*;
