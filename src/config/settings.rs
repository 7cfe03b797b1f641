//! Resolved secret settings
//!
//! [`Settings`] is built once at startup from the selected
//! [`SecretSource`](crate::domain::secrets::SecretSource) and then shared
//! read-only for the life of the process.

use crate::domain::secrets::{ids, SecretSource};
use crate::shared::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// How notification emails are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailBackendKind {
    /// Deliver through an SMTP relay
    Smtp,
    /// Write the email to the log instead of sending it
    Console,
    /// Keep sent emails in an in-process outbox
    Memory,
}

impl EmailBackendKind {
    /// Whether the backend talks to an SMTP host
    pub fn requires_host(&self) -> bool {
        matches!(self, EmailBackendKind::Smtp)
    }
}

impl FromStr for EmailBackendKind {
    type Err = String;

    /// Accepts the short names and the equivalent Django backend paths
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smtp" | "django.core.mail.backends.smtp.emailbackend" => Ok(EmailBackendKind::Smtp),
            "console" | "django.core.mail.backends.console.emailbackend" => {
                Ok(EmailBackendKind::Console)
            }
            "memory" | "locmem" | "django.core.mail.backends.locmem.emailbackend" => {
                Ok(EmailBackendKind::Memory)
            }
            other => Err(format!(
                "unknown email backend '{}' (expected smtp, console or memory)",
                other
            )),
        }
    }
}

/// Outgoing mail settings
#[derive(Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub backend: EmailBackendKind,
    pub host: String,
    pub port: u16,
    /// Upgrade the SMTP connection with STARTTLS
    pub use_tls: bool,
    /// Account used to authenticate and as the sender address
    pub host_user: String,
    pub host_password: String,
    /// Recipient of contact notifications
    pub notify_email: String,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("host_user", &self.host_user)
            .field("host_password", &"<redacted>")
            .field("notify_email", &self.notify_email)
            .finish()
    }
}

/// Immutable process settings resolved from secrets
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Deployment environment tag
    pub environment: String,
    pub secret_key: String,
    /// Expose error details in responses
    pub debug: bool,
    /// Host names this server answers for
    pub allowed_hosts: Vec<String>,
    /// Origins allowed to call the API from a browser
    pub cors_allowed_origins: Vec<String>,
    pub email: EmailSettings,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("environment", &self.environment)
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("email", &self.email)
            .finish()
    }
}

impl Settings {
    /// Resolve every secret through `source`, one lookup per secret.
    ///
    /// Fails on the first secret that cannot be resolved or parsed.
    pub async fn load(source: &dyn SecretSource) -> Result<Self, ConfigurationError> {
        info!(source = source.name(), "Resolving settings");

        let environment = fetch(source, ids::ENVIRONMENT).await?;
        let secret_key = fetch(source, ids::SECRET_KEY).await?;
        let debug = parse_flag(&fetch(source, ids::DEBUG).await?);
        let allowed_hosts = parse_list(&fetch(source, ids::ALLOWED_HOSTS).await?);
        let cors_allowed_origins = parse_list(&fetch(source, ids::CORS_ALLOWED_ORIGINS).await?);

        let backend = fetch(source, ids::EMAIL_BACKEND)
            .await?
            .parse::<EmailBackendKind>()
            .map_err(|reason| ConfigurationError::invalid(ids::EMAIL_BACKEND, reason))?;
        let host = fetch(source, ids::EMAIL_HOST).await?.trim().to_string();
        let port = parse_port(&fetch(source, ids::EMAIL_PORT).await?)?;
        let use_tls = parse_flag(&fetch(source, ids::EMAIL_USE_TLS).await?);
        let host_user = fetch(source, ids::EMAIL_HOST_USER).await?.trim().to_string();
        let notify_email = fetch(source, ids::NOTIFY_EMAIL).await?.trim().to_string();
        let host_password = fetch(source, ids::EMAIL_HOST_PASSWORD).await?;

        let settings = Self {
            environment,
            secret_key,
            debug,
            allowed_hosts,
            cors_allowed_origins,
            email: EmailSettings {
                backend,
                host,
                port,
                use_tls,
                host_user,
                host_password,
                notify_email,
            },
        };

        super::ConfigValidator::validate_settings(&settings)?;
        Ok(settings)
    }
}

async fn fetch(source: &dyn SecretSource, secret_id: &str) -> Result<String, ConfigurationError> {
    let value = source.resolve(secret_id).await?;
    debug!(secret_id = %secret_id, "Resolved secret");
    Ok(value)
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `True`, `true` and `1` are on; everything else is off
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "True" | "true" | "1")
}

fn parse_port(raw: &str) -> Result<u16, ConfigurationError> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigurationError::invalid(
            ids::EMAIL_PORT,
            format!("'{}' is not a valid port", raw),
        )),
        Ok(port) => Ok(port),
    }
}
