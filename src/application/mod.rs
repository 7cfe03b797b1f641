//! Application layer - Use cases
//!
//! This module orchestrates domain logic and adapters for each operation the
//! HTTP layer exposes.

pub mod use_cases;

pub use use_cases::*;
