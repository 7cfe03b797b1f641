//! Infrastructure layer - External concerns and adapters
//!
//! This module contains the secret sources, email delivery and HTTP handling.

pub mod adapters;
pub mod http;

pub use adapters::{build_mailer, secret_source_for, EnvSecretSource, GcpSecretManagerSource, Mailer};
pub use http::HttpServer;
