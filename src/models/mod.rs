//! Data structures shared across the API, the workers, and the repositories.
mod app_state;
pub use app_state::*;

mod api_response;
pub use api_response::*;

mod error;
pub use error::*;

mod onboarding;
pub use onboarding::*;

mod pagination;
pub use pagination::*;
