//! Portfolio Backend - contact form API for a personal portfolio website
//!
//! Settings come from environment variables in local development and from
//! Google Secret Manager everywhere else. Contact submissions are validated
//! field by field and forwarded to the site owner by email.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod middleware;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, Settings};
pub use domain::contact::{ContactSubmission, FieldErrors};
pub use domain::secrets::{SecretMode, SecretSource};
pub use infrastructure::HttpServer;
pub use shared::error::{AppError, AppResult, ConfigurationError};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
