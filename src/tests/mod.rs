//! In-crate test suite
//!
//! - `common`: shared settings, payloads and mocks used by the inline tests
//! - `integration`: end-to-end requests through the full route tree

pub mod common;
pub mod integration;

/// Test configuration and utilities
pub mod config {
    use crate::config::AppConfig;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test logging once per process
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }

    /// Runtime configuration for route tests
    pub fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.rate_limit.enabled = false;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_initialization() {
        config::init();
        let test_config = config::test_config();
        assert!(!test_config.rate_limit.enabled);
        assert!(test_config.validate_config().is_ok());
    }
}
