//! HTTP middleware: CORS, host validation, rate limiting and response headers

pub mod allowed_hosts;
pub mod cors;
pub mod rate_limit;
pub mod security_headers;

pub use allowed_hosts::AllowedHosts;
pub use cors::CorsMiddleware;
pub use rate_limit::RateLimitMiddleware;
