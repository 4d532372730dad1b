//! form-core: Shared infrastructure for the credential form controllers.
pub mod config;
pub mod error;
pub mod observability;
pub mod rate_limit;
pub mod validation;

pub use tracing;
pub use validator;
