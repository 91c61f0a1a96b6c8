//! Configuration loaded from the process environment.
mod server_config;
pub use server_config::*;
