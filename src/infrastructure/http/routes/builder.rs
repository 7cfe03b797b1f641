//! Route builder module
//!
//! Combines the individual routes and applies host validation, rejection
//! recovery, security headers and CORS to all of them.

use crate::{
    application::use_cases::{HealthCheckUseCase, SubmitContactUseCase},
    config::{AppConfig, Settings},
    infrastructure::http::{
        responses::handle_rejection,
        routes::{ContactRoutes, HealthRoutes},
    },
    middleware::{
        allowed_hosts::{create_allowed_hosts_layer, AllowedHosts},
        cors::CorsMiddleware,
        rate_limit::RateLimitMiddleware,
        security_headers::create_security_layer,
    },
};
use std::sync::Arc;
use warp::Filter;

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    pub fn build_routes(
        config: &AppConfig,
        settings: &Settings,
        contact_use_case: Arc<SubmitContactUseCase>,
        health_use_case: Arc<HealthCheckUseCase>,
        rate_limit_middleware: Arc<RateLimitMiddleware>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let contact_route =
            ContactRoutes::create_contact_route(config, contact_use_case, rate_limit_middleware);
        let health_route = HealthRoutes::create_health_route(health_use_case);

        let hosts = Arc::new(AllowedHosts::new(&settings.allowed_hosts));
        let debug = settings.debug;

        create_allowed_hosts_layer(hosts)
            .and(contact_route.or(health_route))
            .recover(move |err| handle_rejection(err, debug))
            .with(create_security_layer())
            .with(CorsMiddleware::new(settings).layer())
    }
}
