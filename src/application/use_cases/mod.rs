//! Use cases - Application business operations

pub mod contact;
pub mod health_check;

pub use contact::SubmitContactUseCase;
pub use health_check::HealthCheckUseCase;
