//! Application configuration structures
//!
//! Non-secret runtime settings. These come from built-in defaults, an
//! optional `Portfolio.toml` file and `PORTFOLIO_APP__*` environment
//! variables, in increasing order of precedence.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use validator::Validate;

/// Default Secret Manager REST endpoint
pub const DEFAULT_SECRET_MANAGER_ENDPOINT: &str = "https://secretmanager.googleapis.com";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server address to bind to
    pub bind_address: IpAddr,

    /// Server port
    #[validate(range(min = 1, max = 65535))]
    pub port: u16,

    /// Maximum request size in bytes
    #[validate(range(min = 1024, max = 1048576))] // 1KB to 1MB
    pub max_request_size: u64,

    /// Proxies in front of the server that append to `X-Forwarded-For`.
    /// Zero ignores the header and uses the peer address.
    #[validate(range(max = 10))]
    pub trusted_proxy_hops: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level
    #[validate(length(min = 1))]
    pub level: String,

    /// Log format
    #[validate(length(min = 1))]
    pub format: String,
}

/// Rate limiting of contact submissions, per client address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RateLimitConfig {
    /// Submissions per minute per client
    #[validate(range(min = 1, max = 1000))]
    pub requests_per_minute: u32,

    /// Burst size
    #[validate(range(min = 1, max = 100))]
    pub burst_size: u32,

    /// Enable rate limiting
    pub enabled: bool,
}

/// Remote secret store connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecretManagerConfig {
    /// REST endpoint, without the `/v1` suffix
    #[validate(url)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,

    /// Rate limiting configuration
    #[validate(nested)]
    pub rate_limit: RateLimitConfig,

    /// Secret manager configuration
    #[validate(nested)]
    pub secret_manager: SecretManagerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: IpAddr::from([0, 0, 0, 0]),
                port: 8080,
                max_request_size: 64 * 1024, // 64KB
                trusted_proxy_hops: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 5,
                burst_size: 5,
                enabled: true,
            },
            secret_manager: SecretManagerConfig {
                endpoint: DEFAULT_SECRET_MANAGER_ENDPOINT.to_string(),
                timeout_seconds: 15,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment variables
    pub fn load() -> crate::Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default()).map_err(|e| {
            crate::shared::error::AppError::Config(format!("Failed to build default configuration: {}", e))
        })?;

        let config = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("Portfolio").required(false))
            .add_source(
                config::Environment::with_prefix("PORTFOLIO_APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| crate::shared::error::AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config.try_deserialize().map_err(|e| {
            crate::shared::error::AppError::Config(format!("Failed to deserialize configuration: {}", e))
        })?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> crate::Result<()> {
        self.validate().map_err(|e| {
            crate::shared::error::AppError::Config(format!("Configuration validation failed: {}", e))
        })?;
        super::ConfigValidator::validate_config(self)
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        match self.server.bind_address {
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.server.port),
            IpAddr::V4(addr) => format!("{}:{}", addr, self.server.port),
        }
    }
}
