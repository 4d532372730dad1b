use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::FormError;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `log_level` when set. Returns an error if a global
/// subscriber is already installed.
pub fn init_tracing(app_name: &str, log_level: &str, json: bool) -> Result<(), FormError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .json()
            .flatten_event(true)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| {
            eprintln!("Failed to initialize tracing for '{}': {}", app_name, e);
            FormError::ConfigError(anyhow::Error::new(e))
        })?;

    tracing::info!(app = %app_name, level = %log_level, "Tracing initialized");
    Ok(())
}
