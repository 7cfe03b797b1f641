//! Configuration validation module
//!
//! This module provides additional validation logic for configuration
//! beyond the basic validator crate validation.

use crate::config::app_config::{AppConfig, LoggingConfig, RateLimitConfig};
use crate::config::settings::Settings;
use crate::domain::secrets::ids;
use crate::shared::error::{AppError, ConfigurationError};
use validator::ValidateEmail;

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete runtime configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_logging_config(&config.logging)?;
        Self::validate_rate_limit_config(&config.rate_limit)?;
        Ok(())
    }

    /// Validate resolved secrets. The first offending secret is reported.
    pub fn validate_settings(settings: &Settings) -> Result<(), ConfigurationError> {
        if settings.secret_key.is_empty() {
            return Err(ConfigurationError::invalid(ids::SECRET_KEY, "must not be empty"));
        }

        if settings.allowed_hosts.is_empty() {
            return Err(ConfigurationError::invalid(
                ids::ALLOWED_HOSTS,
                "at least one host is required",
            ));
        }

        for origin in &settings.cors_allowed_origins {
            if !Self::is_valid_origin(origin) {
                return Err(ConfigurationError::invalid(
                    ids::CORS_ALLOWED_ORIGINS,
                    format!("invalid origin '{}'", origin),
                ));
            }
        }

        if !settings.email.notify_email.validate_email() {
            return Err(ConfigurationError::invalid(
                ids::NOTIFY_EMAIL,
                "not a valid email address",
            ));
        }

        if settings.email.backend.requires_host() && settings.email.host.is_empty() {
            return Err(ConfigurationError::invalid(
                ids::EMAIL_HOST,
                "required by the smtp backend",
            ));
        }

        Ok(())
    }

    /// Validate logging configuration
    fn validate_logging_config(logging: &LoggingConfig) -> crate::Result<()> {
        if !["json", "text"].contains(&logging.format.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log format: {} (expected json or text)",
                logging.format
            )));
        }
        Ok(())
    }

    /// Validate rate limiting configuration
    fn validate_rate_limit_config(rate_limit: &RateLimitConfig) -> crate::Result<()> {
        if rate_limit.enabled && rate_limit.burst_size > rate_limit.requests_per_minute {
            return Err(AppError::Config(
                "Burst size cannot be greater than requests per minute".to_string(),
            ));
        }
        Ok(())
    }

    /// An origin is a scheme and host with an optional port, and nothing else
    fn is_valid_origin(origin: &str) -> bool {
        let Ok(url) = reqwest::Url::parse(origin) else {
            return false;
        };
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some()
            && url.path() == "/"
            && !origin.ends_with('/')
            && url.query().is_none()
            && url.fragment().is_none()
    }
}
