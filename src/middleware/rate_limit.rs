use crate::config::app_config::RateLimitConfig;
use crate::shared::{error::AppError, logging::LoggingUtils};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use warp::Filter;

/// How often idle client entries are dropped from the limiter
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Per-client limiter for contact submissions
pub struct RateLimitMiddleware {
    limiter: Option<DefaultKeyedRateLimiter<String>>,
    requests_per_minute: u32,
}

impl RateLimitMiddleware {
    /// Create a new rate limiting middleware
    pub fn new(config: &RateLimitConfig) -> Self {
        let limiter = config.enabled.then(|| {
            let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
            let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);
            RateLimiter::keyed(Quota::per_minute(per_minute).allow_burst(burst))
        });

        Self {
            limiter,
            requests_per_minute: config.requests_per_minute,
        }
    }

    /// Count one request from `client`
    pub fn check(&self, client: &str) -> Result<(), AppError> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        limiter.check_key(&client.to_string()).map_err(|_| {
            LoggingUtils::log_rate_limit(client, self.requests_per_minute);
            AppError::RateLimit
        })
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.as_ref().map_or(0, |limiter| limiter.len())
    }

    /// Forget clients whose budget has fully refilled
    pub fn prune(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(tracked_clients = limiter.len(), "Pruned rate limiter state");
        }
    }

    /// Prune on a fixed interval for the life of the process
    pub fn spawn_pruning(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                self.prune();
            }
        })
    }
}

/// Create rate limiting layer keyed on the client address
pub fn create_rate_limit_layer(
    middleware: Arc<RateLimitMiddleware>,
    trusted_proxy_hops: usize,
) -> impl Filter<Extract = (), Error = warp::reject::Rejection> + Clone {
    crate::infrastructure::http::utils::client_ip(trusted_proxy_hops)
        .and(warp::any().map(move || middleware.clone()))
        .and_then(rate_limit_check)
        .untuple_one()
}

async fn rate_limit_check(
    client_ip: String,
    middleware: Arc<RateLimitMiddleware>,
) -> Result<(), warp::reject::Rejection> {
    middleware.check(&client_ip).map_err(warp::reject::custom)
}
