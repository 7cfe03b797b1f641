use crate::{
    config::Settings,
    domain::{contact::ContactSubmission, notification::Notification},
    infrastructure::adapters::Mailer,
    shared::error::{AppError, AppResult},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for handling a contact form submission
pub struct SubmitContactUseCase {
    settings: Arc<Settings>,
    mailer: Arc<dyn Mailer>,
}

impl SubmitContactUseCase {
    /// Create a new use case
    pub fn new(settings: Arc<Settings>, mailer: Arc<dyn Mailer>) -> Self {
        Self { settings, mailer }
    }

    /// Validate the payload and notify the site owner.
    ///
    /// Nothing is sent when validation fails.
    pub async fn execute(&self, payload: &Value) -> AppResult<ContactSubmission> {
        let submission = ContactSubmission::validate(payload).map_err(|errors| {
            warn!(fields = ?errors.fields().collect::<Vec<_>>(), "Contact submission failed validation");
            AppError::Validation(errors)
        })?;

        let notification = Notification::for_submission(
            &submission,
            &self.settings.email.host_user,
            &self.settings.email.notify_email,
        );
        self.mailer.send(&notification).await?;

        info!(backend = self.mailer.backend(), "Contact notification sent");
        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::MemoryMailer;
    use crate::tests::common::{test_settings, valid_payload, FailingMailer};
    use serde_json::json;

    #[tokio::test]
    async fn test_valid_submission_is_delivered() {
        let mailer = Arc::new(MemoryMailer::default());
        let use_case = SubmitContactUseCase::new(Arc::new(test_settings()), mailer.clone());

        let submission = use_case.execute(&valid_payload()).await.unwrap();
        assert_eq!(submission.name, "Ada");

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].from, "site@example.com");
        assert_eq!(sent[0].reply_to, "ada@example.com");
        assert_eq!(sent[0].subject, "Hi");
    }

    #[tokio::test]
    async fn test_invalid_submission_sends_nothing() {
        let mailer = Arc::new(MemoryMailer::default());
        let use_case = SubmitContactUseCase::new(Arc::new(test_settings()), mailer.clone());

        let err = use_case.execute(&json!({"name": "Ada"})).await.unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.contains("email"));
                assert!(errors.contains("message"));
                assert!(!errors.contains("name"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_reported() {
        let use_case = SubmitContactUseCase::new(Arc::new(test_settings()), Arc::new(FailingMailer));
        let err = use_case.execute(&valid_payload()).await.unwrap_err();
        assert!(matches!(err, AppError::Email(_)));
    }
}
