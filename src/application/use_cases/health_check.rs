use crate::{
    config::Settings,
    domain::{health::*, secrets::LOCAL_ENVIRONMENT},
    shared::error::AppResult,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Health check use case
pub struct HealthCheckUseCase {
    settings: Arc<Settings>,
    email_backend: &'static str,
    started_at: Instant,
}

impl HealthCheckUseCase {
    /// Create a new health check use case
    pub fn new(settings: Arc<Settings>, email_backend: &'static str) -> Self {
        Self {
            settings,
            email_backend,
            started_at: Instant::now(),
        }
    }

    /// Execute health check
    pub async fn execute(&self) -> AppResult<HealthResponse> {
        let mut status = HealthStatus::Healthy;
        let mut details = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "uptime": self.get_uptime(),
            "environment": self.settings.environment,
            "email_backend": self.email_backend,
        });

        // Outside local development, mail that never leaves the process is lost
        if self.email_backend != "smtp" && self.settings.environment != LOCAL_ENVIRONMENT {
            status = HealthStatus::Degraded;
            details["warnings"] = json!([
                "Contact notifications are not delivered by email"
            ]);
        }

        Ok(HealthResponse::new(status, details))
    }

    /// Get process uptime
    fn get_uptime(&self) -> String {
        let secs = self.started_at.elapsed().as_secs();
        let days = secs / 86400;
        let hours = (secs % 86400) / 3600;
        let minutes = (secs % 3600) / 60;
        format!("{}d {}h {}m", days, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::test_settings;

    #[tokio::test]
    async fn test_local_memory_backend_is_healthy() {
        let use_case = HealthCheckUseCase::new(Arc::new(test_settings()), "memory");
        let response = use_case.execute().await.unwrap();

        assert!(response.is_healthy());
        let details = response.details.as_object().unwrap();
        assert!(details.contains_key("timestamp"));
        assert!(details.contains_key("version"));
        assert_eq!(details["uptime"], "0d 0h 0m");
        assert_eq!(details["email_backend"], "memory");
    }

    #[tokio::test]
    async fn test_production_without_smtp_is_degraded() {
        let mut settings = test_settings();
        settings.environment = "production".to_string();
        let use_case = HealthCheckUseCase::new(Arc::new(settings), "console");

        let response = use_case.execute().await.unwrap();
        assert_eq!(response.status, HealthStatus::Degraded);
        assert!(response.details.get("warnings").is_some());
    }

    #[tokio::test]
    async fn test_production_with_smtp_is_healthy() {
        let mut settings = test_settings();
        settings.environment = "production".to_string();
        let use_case = HealthCheckUseCase::new(Arc::new(settings), "smtp");
        assert!(use_case.execute().await.unwrap().is_healthy());
    }
}
