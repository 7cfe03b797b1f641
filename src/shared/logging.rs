//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{error, info, warn};

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified level and format.
    ///
    /// `RUST_LOG` takes precedence over `level` when set. `format` is either
    /// `json` or `text`.
    pub fn initialize(level: &str, format: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| {
            crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e))
        })
    }

    /// Log an incoming contact submission
    pub fn log_submission(request_id: &str, client_ip: &str, user_agent: Option<&str>) {
        info!(
            request_id = %request_id,
            client_ip = %client_ip,
            user_agent = user_agent,
            "Processing contact submission"
        );
    }

    /// Log a successful response
    pub fn log_success(request_id: &str, duration_ms: u64) {
        info!(
            request_id = %request_id,
            duration_ms = %duration_ms,
            "Contact submission delivered"
        );
    }

    /// Log a rejected or failed submission
    pub fn log_error(request_id: &str, error: &crate::shared::error::AppError, duration_ms: u64) {
        if error.is_client_error() {
            warn!(
                request_id = %request_id,
                error = %error,
                duration_ms = %duration_ms,
                "Contact submission rejected"
            );
        } else {
            error!(
                request_id = %request_id,
                error = %error,
                duration_ms = %duration_ms,
                "Contact submission failed"
            );
        }
    }

    /// Log security events
    pub fn log_security_event(event_type: &str, details: &str, client_ip: &str) {
        warn!(
            event_type = %event_type,
            details = %details,
            client_ip = %client_ip,
            "Security event detected"
        );
    }

    /// Log rate limiting events
    pub fn log_rate_limit(client_ip: &str, limit: u32) {
        warn!(
            client_ip = %client_ip,
            limit_per_minute = %limit,
            "Rate limit exceeded"
        );
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_is_unique() {
        let a = LoggingUtils::generate_request_id();
        let b = LoggingUtils::generate_request_id();
        assert!(a.starts_with("req_"));
        assert_eq!(a.len(), "req_".len() + 32);
        assert_ne!(a, b);
    }
}
