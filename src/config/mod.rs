//! Configuration management module
//!
//! This module handles all configuration concerns: non-secret runtime
//! settings loaded through the `config` crate, and the secret settings
//! resolved once at startup.

pub mod app_config;
pub mod settings;
pub mod validation;

pub use app_config::AppConfig;
pub use settings::{EmailBackendKind, EmailSettings, Settings};
pub use validation::ConfigValidator;
