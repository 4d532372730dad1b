//! Signup and login form controllers.
//!
//! Each controller owns one screen's form state, validates it, and calls out
//! to the collaborators in [`services`] for account creation, code delivery,
//! authentication and navigation.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::FormsConfig;
pub use handlers::{LoginController, LoginError, SignupController, SignupError};

use form_core::error::FormError;

/// Load configuration and install logging for a host application.
pub fn init() -> Result<FormsConfig, FormError> {
    let config = FormsConfig::from_env()?;
    form_core::observability::init_tracing(
        &config.app_name,
        &config.common.log_level,
        config.common.json_logs,
    )?;
    Ok(config)
}
