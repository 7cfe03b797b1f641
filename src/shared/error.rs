//! Error handling module
//!
//! This module provides centralized error handling for the application.
//! Two kinds of failure matter to callers: configuration errors, which are
//! fatal at startup, and field validation errors, which are returned to the
//! client as a rejection.

use crate::domain::contact::FieldErrors;
use thiserror::Error;
use warp::http::StatusCode;

/// Failure to resolve or interpret a secret at startup.
///
/// Every variant names the secret it concerns so the operator can tell which
/// value is missing from the environment or the secret store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Environment variable '{secret_id}' not found.")]
    MissingVariable { secret_id: String },

    #[error("Error accessing secret '{secret_id}': {reason}")]
    SecretAccess { secret_id: String, reason: String },

    #[error("Invalid value for '{secret_id}': {reason}")]
    InvalidValue { secret_id: String, reason: String },
}

impl ConfigurationError {
    /// Identifier of the secret this error concerns
    pub fn secret_id(&self) -> &str {
        match self {
            ConfigurationError::MissingVariable { secret_id }
            | ConfigurationError::SecretAccess { secret_id, .. }
            | ConfigurationError::InvalidValue { secret_id, .. } => secret_id,
        }
    }

    pub(crate) fn access(secret_id: &str, reason: impl std::fmt::Display) -> Self {
        ConfigurationError::SecretAccess {
            secret_id: secret_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(secret_id: &str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidValue {
            secret_id: secret_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Secret(#[from] ConfigurationError),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Email delivery failed: {0}")]
    Email(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Invalid host header: {0}")]
    InvalidHost(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidHost(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            AppError::Config(_)
            | AppError::Secret(_)
            | AppError::Email(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was caused by the client rather than the server
    pub fn is_client_error(&self) -> bool {
        self.http_status_code().is_client_error()
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(err: lettre::error::Error) -> Self {
        AppError::Email(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        AppError::Email(err.to_string())
    }
}
