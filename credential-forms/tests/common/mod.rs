//! Common test utilities for form controller integration tests.

use credential_forms::FormsConfig;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Default configuration with logging installed once per test binary.
pub fn setup() -> FormsConfig {
    let config = FormsConfig::default();
    TRACING.call_once(|| {
        // Another binary-wide subscriber may already exist; logging is best effort here.
        let _ = form_core::observability::init_tracing(&config.app_name, "error", false);
    });
    config
}

/// Configuration without a limit on one-time-code requests.
#[allow(dead_code)]
pub fn setup_unlimited() -> FormsConfig {
    let mut config = setup();
    config.resend_limit = None;
    config
}
