//! HTTP handlers

pub mod contact;
pub mod health;

pub use contact::handle_contact_request;
pub use health::handle_health_request;
