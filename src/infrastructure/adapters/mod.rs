//! Infrastructure adapters module
//!
//! This module contains adapters for external services: secret sources and
//! email delivery.

pub mod env_secrets;
pub mod gcp_secret_manager;
pub mod mailer;

pub use env_secrets::EnvSecretSource;
pub use gcp_secret_manager::{AccessToken, GcpSecretManagerSource};
pub use mailer::{build_mailer, ConsoleMailer, Mailer, MemoryMailer, SmtpMailer};

use crate::config::app_config::SecretManagerConfig;
use crate::domain::secrets::{SecretMode, SecretSource};
use crate::shared::error::AppResult;
use std::sync::Arc;

/// Select the secret source for a deployment mode
pub fn secret_source_for(mode: SecretMode, config: &SecretManagerConfig) -> AppResult<Arc<dyn SecretSource>> {
    let source: Arc<dyn SecretSource> = match mode {
        SecretMode::Local => Arc::new(EnvSecretSource::from_process()),
        SecretMode::Remote => Arc::new(GcpSecretManagerSource::from_config(config)?),
    };
    Ok(source)
}
