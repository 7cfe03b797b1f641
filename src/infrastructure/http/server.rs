//! HTTP server implementation for reverse proxy deployment
//!
//! TLS termination is left to the proxy in front of the server.

use crate::{
    application::use_cases::{HealthCheckUseCase, SubmitContactUseCase},
    config::{AppConfig, Settings},
    infrastructure::{adapters::Mailer, http::routes::RouteBuilder},
    middleware::rate_limit::{RateLimitMiddleware, PRUNE_INTERVAL},
    shared::error::{AppError, AppResult},
};
use std::sync::Arc;
use tracing::{info, instrument};
use warp::{Filter, Reply};

/// HTTP server for the contact endpoint
pub struct HttpServer {
    config: AppConfig,
    settings: Arc<Settings>,
    contact_use_case: Arc<SubmitContactUseCase>,
    health_use_case: Arc<HealthCheckUseCase>,
    rate_limit_middleware: Arc<RateLimitMiddleware>,
}

impl HttpServer {
    /// Wire the use cases and middleware together
    pub fn new(config: AppConfig, settings: Arc<Settings>, mailer: Arc<dyn Mailer>) -> Self {
        let health_use_case = Arc::new(HealthCheckUseCase::new(settings.clone(), mailer.backend()));
        let contact_use_case = Arc::new(SubmitContactUseCase::new(settings.clone(), mailer));
        let rate_limit_middleware = Arc::new(RateLimitMiddleware::new(&config.rate_limit));

        Self {
            config,
            settings,
            contact_use_case,
            health_use_case,
            rate_limit_middleware,
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the HTTP server until the process is stopped
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let addr: std::net::SocketAddr = self
            .config
            .server_address()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

        info!(
            address = %addr,
            environment = %self.settings.environment,
            debug = self.settings.debug,
            "Starting HTTP server"
        );

        self.rate_limit_middleware
            .clone()
            .spawn_pruning(PRUNE_INTERVAL);

        warp::serve(self.create_routes()).run(addr).await;
        Ok(())
    }

    /// Create the application routes
    pub fn create_routes(&self) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
        RouteBuilder::build_routes(
            &self.config,
            &self.settings,
            self.contact_use_case.clone(),
            self.health_use_case.clone(),
            self.rate_limit_middleware.clone(),
        )
    }
}
