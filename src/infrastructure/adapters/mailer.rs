//! Notification email delivery
//!
//! The backend is chosen from [`EmailSettings`] at startup: SMTP through
//! lettre, the log, or an in-process outbox.

use crate::{
    config::{EmailBackendKind, EmailSettings},
    domain::{notification::Notification, secrets::ids},
    shared::error::{AppError, AppResult, ConfigurationError},
};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Sends notification emails
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> AppResult<()>;

    /// Short name used in logs and health output
    fn backend(&self) -> &'static str;
}

/// Build the mailer selected by the email settings
pub fn build_mailer(settings: &EmailSettings) -> Result<Arc<dyn Mailer>, ConfigurationError> {
    let mailer: Arc<dyn Mailer> = match settings.backend {
        EmailBackendKind::Smtp => Arc::new(SmtpMailer::new(settings)?),
        EmailBackendKind::Console => Arc::new(ConsoleMailer),
        EmailBackendKind::Memory => Arc::new(MemoryMailer::default()),
    };
    info!(backend = mailer.backend(), "Email backend configured");
    Ok(mailer)
}

/// SMTP delivery, with STARTTLS when `use_tls` is set
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &EmailSettings) -> Result<Self, ConfigurationError> {
        settings
            .host_user
            .parse::<Mailbox>()
            .map_err(|e| ConfigurationError::invalid(ids::EMAIL_HOST_USER, e.to_string()))?;

        let builder = if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| ConfigurationError::invalid(ids::EMAIL_HOST, e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.host_user.clone(),
                settings.host_password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        let message = build_message(notification)?;
        self.transport.send(message).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "smtp"
    }
}

/// Writes emails to the log instead of sending them
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        info!(
            from = %notification.from,
            to = %notification.to,
            reply_to = %notification.reply_to,
            subject = %notification.subject,
            body = %notification.body,
            "Notification email (console backend)"
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "console"
    }
}

/// Keeps sent emails in memory
#[derive(Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<Notification>>,
}

impl MemoryMailer {
    /// Emails sent so far, oldest first
    pub async fn sent(&self) -> Vec<Notification> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, notification: &Notification) -> AppResult<()> {
        self.outbox.lock().await.push(notification.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

fn build_message(notification: &Notification) -> AppResult<Message> {
    let mailbox = |field: &str, raw: &str| {
        raw.parse::<Mailbox>()
            .map_err(|e| AppError::Email(format!("invalid {} address '{}': {}", field, raw, e)))
    };

    let message = Message::builder()
        .from(mailbox("from", &notification.from)?)
        .reply_to(mailbox("reply-to", &notification.reply_to)?)
        .to(mailbox("to", &notification.to)?)
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())?;

    Ok(message)
}
