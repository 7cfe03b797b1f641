//! Contact routes module

use crate::{
    application::use_cases::SubmitContactUseCase,
    config::AppConfig,
    infrastructure::http::{
        handlers::handle_contact_request,
        utils::{client_ip, with_contact_use_case},
    },
    middleware::rate_limit::{create_rate_limit_layer, RateLimitMiddleware},
};
use std::sync::Arc;
use warp::Filter;

/// Contact routes configuration
pub struct ContactRoutes;

impl ContactRoutes {
    /// `POST /api/contact`
    pub fn create_contact_route(
        config: &AppConfig,
        use_case: Arc<SubmitContactUseCase>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let trusted_hops = config.server.trusted_proxy_hops;

        warp::path!("api" / "contact")
            .and(warp::post())
            .and(create_rate_limit_layer(rate_limit_middleware, trusted_hops))
            .and(warp::body::content_length_limit(config.server.max_request_size))
            .and(warp::body::json())
            .and(client_ip(trusted_hops))
            .and(warp::header::optional::<String>("user-agent"))
            .and(with_contact_use_case(use_case))
            .and_then(handle_contact_request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::MemoryMailer;
    use crate::tests::common::{test_settings, valid_payload};

    fn route(
        mailer: Arc<MemoryMailer>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let config = AppConfig::default();
        let use_case = Arc::new(SubmitContactUseCase::new(Arc::new(test_settings()), mailer));
        let rate_limit = Arc::new(RateLimitMiddleware::new(&config.rate_limit));
        ContactRoutes::create_contact_route(&config, use_case, rate_limit)
    }

    #[tokio::test]
    async fn test_contact_route_delivers() {
        let mailer = Arc::new(MemoryMailer::default());
        let res = warp::test::request()
            .method("POST")
            .path("/api/contact")
            .json(&valid_payload())
            .reply(&route(mailer.clone()))
            .await;

        assert_eq!(res.status(), warp::http::StatusCode::OK);
        assert_eq!(mailer.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn test_contact_route_rejects_get() {
        let res = warp::test::request()
            .method("GET")
            .path("/api/contact")
            .reply(&route(Arc::new(MemoryMailer::default())))
            .await;
        assert_eq!(res.status(), warp::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
