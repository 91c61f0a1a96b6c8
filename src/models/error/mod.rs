mod api;
pub use api::*;

mod repository;
pub use repository::*;

mod workflow;
pub use workflow::*;
