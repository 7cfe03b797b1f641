//! CORS configuration
//!
//! Browser calls are accepted only from the origins listed in
//! `PORTFOLIO_CORS_ALLOWED_ORIGINS`. Origins are validated when settings load,
//! so every entry here is a well-formed `scheme://host[:port]`.

use crate::config::Settings;
use tracing::info;

/// Methods the API answers cross-origin
pub const CORS_METHODS: [&str; 3] = ["GET", "POST", "OPTIONS"];

/// Request headers browsers may send cross-origin
pub const CORS_HEADERS: [&str; 2] = ["content-type", "accept"];

/// Preflight cache lifetime in seconds
pub const CORS_MAX_AGE: u32 = 3600;

/// CORS middleware built from the resolved settings
pub struct CorsMiddleware {
    origins: Vec<String>,
}

impl CorsMiddleware {
    /// Create a new CORS middleware
    pub fn new(settings: &Settings) -> Self {
        info!(origins = ?settings.cors_allowed_origins, "CORS origins configured");
        Self {
            origins: settings.cors_allowed_origins.clone(),
        }
    }

    /// Configured origins
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// Build the warp CORS wrapper
    pub fn layer(&self) -> warp::cors::Builder {
        warp::cors()
            .allow_origins(self.origins.iter().map(String::as_str))
            .allow_methods(CORS_METHODS)
            .allow_headers(CORS_HEADERS)
            .max_age(CORS_MAX_AGE)
    }
}
