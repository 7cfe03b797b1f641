//! Integration tests for the HTTP endpoints
//!
//! Requests go through the full route tree: host validation, rate limiting,
//! rejection recovery, security headers and CORS.

#[cfg(test)]
mod tests {
    use crate::{
        config::AppConfig,
        infrastructure::{adapters::{Mailer, MemoryMailer}, http::HttpServer},
        tests::{
            common::{test_settings, valid_payload, FailingMailer},
            config::{init, test_config},
        },
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use warp::http::StatusCode;
    use warp::Filter;

    fn server(config: AppConfig, mailer: Arc<dyn Mailer>) -> HttpServer {
        init();
        HttpServer::new(config, Arc::new(test_settings()), mailer)
    }

    async fn post_contact<F>(routes: &F, payload: &Value) -> (StatusCode, Value)
    where
        F: Filter + Clone + Send + Sync + 'static,
        F::Extract: warp::Reply + Send,
    {
        let res = warp::test::request()
            .method("POST")
            .path("/api/contact")
            .header("host", "localhost:8080")
            .header("x-forwarded-for", "203.0.113.7")
            .json(payload)
            .reply(routes)
            .await;
        let status = res.status();
        (status, serde_json::from_slice(res.body()).unwrap())
    }

    #[tokio::test]
    async fn test_contact_success_delivers_notification() {
        let mailer = Arc::new(MemoryMailer::default());
        let routes = server(test_config(), mailer.clone()).create_routes();

        let (status, body) = post_contact(&routes, &valid_payload()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Your message has been sent." }));

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert!(sent[0].body.contains("Hello"));
    }

    #[tokio::test]
    async fn test_contact_validation_errors() {
        let mailer = Arc::new(MemoryMailer::default());
        let routes = server(test_config(), mailer.clone()).create_routes();

        let payload = json!({
            "name": "a".repeat(51),
            "email": "not-an-email",
            "subject": "Hi",
            "isPrivacyPolicyAccepted": "yes"
        });
        let (status, body) = post_contact(&routes, &payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["email", "isPrivacyPolicyAccepted", "message", "name"]);
        assert_eq!(body["message"], json!(["This field is required."]));
        assert!(mailer.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_contact_malformed_json() {
        let routes = server(test_config(), Arc::new(MemoryMailer::default())).create_routes();

        let res = warp::test::request()
            .method("POST")
            .path("/api/contact")
            .header("host", "localhost")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("JSON parse error"));
    }

    #[tokio::test]
    async fn test_delivery_failure_returns_server_error() {
        let routes = server(test_config(), Arc::new(FailingMailer)).create_routes();

        let (status, body) = post_contact(&routes, &valid_payload()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        // test settings run with debug on
        assert!(body["detail"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_unknown_host_is_rejected() {
        let routes = server(test_config(), Arc::new(MemoryMailer::default())).create_routes();

        let res = warp::test::request()
            .method("GET")
            .path("/health")
            .header("host", "evil.test")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({ "error": "Invalid host header" }));
    }

    #[tokio::test]
    async fn test_rate_limit_after_burst() {
        let mut config = test_config();
        config.rate_limit.enabled = true;
        config.rate_limit.requests_per_minute = 2;
        config.rate_limit.burst_size = 2;
        let routes = server(config, Arc::new(MemoryMailer::default())).create_routes();

        for _ in 0..2 {
            let (status, _) = post_contact(&routes, &valid_payload()).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = post_contact(&routes, &valid_payload()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Request was throttled.");
    }

    #[tokio::test]
    async fn test_rate_limit_ignores_client_supplied_forwarded_entries() {
        let mut config = test_config();
        config.rate_limit.enabled = true;
        config.rate_limit.requests_per_minute = 2;
        config.rate_limit.burst_size = 2;
        let routes = server(config, Arc::new(MemoryMailer::default())).create_routes();

        let mut accepted = 0;
        for i in 0..20 {
            let res = warp::test::request()
                .method("POST")
                .path("/api/contact")
                .header("host", "localhost")
                .header("x-forwarded-for", format!("10.0.0.{}, 203.0.113.7", i))
                .json(&valid_payload())
                .reply(&routes)
                .await;
            if res.status() == StatusCode::OK {
                accepted += 1;
            } else {
                assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
            }
        }

        assert_eq!(accepted, 2);
    }

    #[tokio::test]
    async fn test_health_endpoint_with_security_headers() {
        let routes = server(test_config(), Arc::new(MemoryMailer::default())).create_routes();

        let res = warp::test::request()
            .method("GET")
            .path("/health")
            .header("host", "127.0.0.1:8080")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
        assert_eq!(res.headers()["x-frame-options"], "DENY");
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["email_backend"], "memory");
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let routes = server(test_config(), Arc::new(MemoryMailer::default())).create_routes();

        let res = warp::test::request()
            .method("GET")
            .path("/admin")
            .header("host", "localhost")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let routes = server(test_config(), Arc::new(MemoryMailer::default())).create_routes();

        let res = warp::test::request()
            .method("OPTIONS")
            .path("/api/contact")
            .header("host", "localhost")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .reply(&routes)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "http://localhost:3000");
    }
}
