//! Common test utilities and mock implementations

use crate::{
    config::{EmailBackendKind, EmailSettings, Settings},
    domain::{notification::Notification, secrets::ids},
    infrastructure::adapters::Mailer,
    shared::error::{AppError, AppResult},
};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Settings for a local development deployment with the memory mailer
pub fn test_settings() -> Settings {
    Settings {
        environment: "local".to_string(),
        secret_key: "test-secret-key".to_string(),
        debug: true,
        allowed_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        email: EmailSettings {
            backend: EmailBackendKind::Memory,
            host: "smtp.example.com".to_string(),
            port: 587,
            use_tls: true,
            host_user: "site@example.com".to_string(),
            host_password: "smtp-pass-9f3k".to_string(),
            notify_email: "owner@example.com".to_string(),
        },
    }
}

/// Raw secret values equivalent to [`test_settings`]
pub fn local_secret_pairs() -> Vec<(String, String)> {
    [
        (ids::ENVIRONMENT, "local"),
        (ids::SECRET_KEY, "test-secret-key"),
        (ids::DEBUG, "True"),
        (ids::ALLOWED_HOSTS, "localhost, 127.0.0.1"),
        (ids::CORS_ALLOWED_ORIGINS, "http://localhost:3000"),
        (ids::EMAIL_BACKEND, "memory"),
        (ids::EMAIL_HOST, "smtp.example.com"),
        (ids::EMAIL_PORT, "587"),
        (ids::EMAIL_USE_TLS, "True"),
        (ids::EMAIL_HOST_USER, "site@example.com"),
        (ids::NOTIFY_EMAIL, "owner@example.com"),
        (ids::EMAIL_HOST_PASSWORD, "smtp-pass-9f3k"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

/// A submission that passes validation
pub fn valid_payload() -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "subject": "Hi",
        "message": "Hello",
        "isPrivacyPolicyAccepted": true
    })
}

/// Mailer whose relay is always down
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _notification: &Notification) -> AppResult<()> {
        Err(AppError::Email("connection refused".to_string()))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
