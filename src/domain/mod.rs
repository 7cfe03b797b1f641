//! Domain layer - Core business logic and domain models
//!
//! This module contains the contact form rules and the secret resolution
//! contract, independent of HTTP, SMTP and cloud APIs.

pub mod contact;
pub mod health;
pub mod notification;
pub mod secrets;

pub use contact::{ContactSubmission, FieldErrors};
pub use health::{HealthResponse, HealthStatus};
pub use notification::Notification;
pub use secrets::{SecretMode, SecretSource};
