//! Core business logic: the onboarding workflow body and the retry state
//! machine that drives it.
mod attempt;
pub use attempt::*;

mod workflow;
pub use workflow::*;
