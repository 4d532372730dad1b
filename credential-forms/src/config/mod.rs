use form_core::config as core_config;
use form_core::error::FormError;
use form_core::rate_limit::{RateLimitConfig, MAX_WINDOW_SECONDS};
use form_core::validation::patterns;
use std::env;

use crate::models::Country;

#[derive(Debug, Clone)]
pub struct FormsConfig {
    pub common: core_config::Config,
    pub app_name: String,
    pub default_country: Country,
    /// `None` disables the limit on one-time-code requests.
    pub resend_limit: Option<RateLimitConfig>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            app_name: "credential-forms".to_string(),
            default_country: Country::default(),
            resend_limit: Some(RateLimitConfig {
                attempts: 3,
                window_seconds: 15 * 60,
            }),
        }
    }
}

impl FormsConfig {
    pub fn from_env() -> Result<Self, FormError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(
        common: core_config::Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, FormError> {
        let defaults = Self::default();
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let resend_enabled: bool = get("RESEND_LIMIT_ENABLED", "true")
            .parse()
            .map_err(|e: std::str::ParseBoolError| {
                FormError::ConfigError(anyhow::anyhow!("RESEND_LIMIT_ENABLED: {}", e))
            })?;

        let config = FormsConfig {
            common,
            app_name: get("APP_NAME", defaults.app_name.as_str()),
            default_country: Country {
                iso_code: get("DEFAULT_COUNTRY_CODE", defaults.default_country.iso_code.as_str()),
                calling_code: get(
                    "DEFAULT_CALLING_CODE",
                    defaults.default_country.calling_code.as_str(),
                ),
            },
            resend_limit: if resend_enabled {
                Some(RateLimitConfig {
                    attempts: get("RESEND_LIMIT_ATTEMPTS", "3")
                        .parse()
                        .map_err(|e: std::num::ParseIntError| {
                            FormError::ConfigError(anyhow::anyhow!(
                                "RESEND_LIMIT_ATTEMPTS: {}",
                                e
                            ))
                        })?,
                    window_seconds: get("RESEND_LIMIT_WINDOW_SECONDS", "900")
                        .parse()
                        .map_err(|e: std::num::ParseIntError| {
                            FormError::ConfigError(anyhow::anyhow!(
                                "RESEND_LIMIT_WINDOW_SECONDS: {}",
                                e
                            ))
                        })?,
                })
            } else {
                None
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FormError> {
        if !patterns::CALLING_CODE.is_match(&self.default_country.calling_code) {
            return Err(FormError::ConfigError(anyhow::anyhow!(
                "DEFAULT_CALLING_CODE must be 1-4 digits without '+'"
            )));
        }

        if let Some(limit) = &self.resend_limit {
            if limit.attempts == 0 || limit.window_seconds == 0 {
                return Err(FormError::ConfigError(anyhow::anyhow!(
                    "RESEND_LIMIT_ATTEMPTS and RESEND_LIMIT_WINDOW_SECONDS must be positive"
                )));
            }
            if limit.window_seconds > MAX_WINDOW_SECONDS {
                return Err(FormError::ConfigError(anyhow::anyhow!(
                    "RESEND_LIMIT_WINDOW_SECONDS must be at most {}",
                    MAX_WINDOW_SECONDS
                )));
            }
        }

        Ok(())
    }
}
