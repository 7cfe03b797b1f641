//! Route definitions

pub mod builder;
pub mod contact;
pub mod health;

pub use builder::RouteBuilder;
pub use contact::ContactRoutes;
pub use health::HealthRoutes;
