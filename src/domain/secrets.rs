//! Secret resolution contract
//!
//! Secrets are looked up by identifier through a [`SecretSource`]. Which
//! source is used depends on the deployment mode, decided once from the
//! environment indicator when the process starts.

use crate::shared::error::ConfigurationError;
use async_trait::async_trait;

/// Name of the environment indicator variable
pub const ENVIRONMENT_VARIABLE: &str = "PORTFOLIO_ENVIRONMENT";

/// Indicator value selecting local mode
pub const LOCAL_ENVIRONMENT: &str = "local";

/// Project holding the remote secrets
pub const SECRET_PROJECT_ID: &str = "veysel-server-456622";

/// Version tag requested from the remote store
pub const SECRET_VERSION: &str = "latest";

/// Identifiers of every secret the service consumes
pub mod ids {
    pub const ENVIRONMENT: &str = "PORTFOLIO_ENVIRONMENT";
    pub const SECRET_KEY: &str = "PORTFOLIO_SECRET_KEY";
    pub const DEBUG: &str = "PORTFOLIO_DEBUG";
    pub const ALLOWED_HOSTS: &str = "PORTFOLIO_ALLOWED_HOSTS";
    pub const CORS_ALLOWED_ORIGINS: &str = "PORTFOLIO_CORS_ALLOWED_ORIGINS";
    pub const EMAIL_BACKEND: &str = "PORTFOLIO_EMAIL_BACKEND";
    pub const EMAIL_HOST: &str = "PORTFOLIO_EMAIL_HOST";
    pub const EMAIL_PORT: &str = "PORTFOLIO_EMAIL_PORT";
    pub const EMAIL_USE_TLS: &str = "PORTFOLIO_EMAIL_USE_TLS";
    pub const EMAIL_HOST_USER: &str = "PORTFOLIO_EMAIL_HOST_USER";
    pub const NOTIFY_EMAIL: &str = "PORTFOLIO_NOTIFY_EMAIL";
    pub const EMAIL_HOST_PASSWORD: &str = "PORTFOLIO_EMAIL_HOST_PASSWORD";
}

/// Where secrets are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretMode {
    /// Process environment variables
    Local,
    /// Remote secret manager
    Remote,
}

impl SecretMode {
    /// Derive the mode from the raw indicator. Only the exact local tag
    /// selects local mode; anything else, including absence, is remote.
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some(LOCAL_ENVIRONMENT) => SecretMode::Local,
            _ => SecretMode::Remote,
        }
    }

    /// Read the indicator from the process environment
    pub fn from_process_env() -> Self {
        let indicator = std::env::var(ENVIRONMENT_VARIABLE).ok();
        Self::from_indicator(indicator.as_deref())
    }
}

/// A source of secret values.
///
/// Implementations perform a fresh lookup on every call; nothing is cached.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Resolve a secret by identifier
    async fn resolve(&self, secret_id: &str) -> Result<String, ConfigurationError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Resource path of the latest version of a secret in the remote store
pub fn secret_version_path(project_id: &str, secret_id: &str) -> String {
    format!(
        "projects/{}/secrets/{}/versions/{}",
        project_id, secret_id, SECRET_VERSION
    )
}
