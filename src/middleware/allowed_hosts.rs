//! Host header validation
//!
//! Requests are served only when their `Host` header names one of the
//! configured hosts. A pattern of `*` matches any host; a pattern starting
//! with a dot, such as `.example.com`, matches `example.com` and every
//! subdomain of it.

use crate::shared::{error::AppError, logging::LoggingUtils};
use regex::Regex;
use std::sync::{Arc, OnceLock};
use warp::Filter;

fn host_regex() -> Option<&'static Regex> {
    static HOST_RE: OnceLock<Option<Regex>> = OnceLock::new();
    HOST_RE
        .get_or_init(|| Regex::new(r"^([a-z0-9.-]+|\[[a-f0-9]*:[a-f0-9.:]+\])(:[0-9]+)?$").ok())
        .as_ref()
}

/// Split a `Host` header into its domain, lowercased and without port or
/// trailing dot. `None` when the header is malformed.
pub fn split_domain(host: &str) -> Option<String> {
    let host = host.trim().to_ascii_lowercase();
    let captures = host_regex()?.captures(&host)?;
    let domain = captures.get(1)?.as_str();
    Some(domain.strip_suffix('.').unwrap_or(domain).to_string())
}

/// The set of host patterns this server answers for
#[derive(Debug, Clone)]
pub struct AllowedHosts {
    patterns: Vec<String>,
}

impl AllowedHosts {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_ascii_lowercase()).collect(),
        }
    }

    /// Whether a raw `Host` header value is acceptable
    pub fn is_allowed(&self, host: &str) -> bool {
        let Some(domain) = split_domain(host) else {
            return false;
        };
        self.patterns.iter().any(|pattern| matches_pattern(&domain, pattern))
    }
}

fn matches_pattern(domain: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(suffix) = pattern.strip_prefix('.') {
        return domain == suffix || domain.ends_with(pattern);
    }
    domain == pattern
}

/// Reject requests whose `Host` header is missing or not allowed
pub fn create_allowed_hosts_layer(
    hosts: Arc<AllowedHosts>,
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("host")
        .and(warp::any().map(move || hosts.clone()))
        .and_then(check_host)
        .untuple_one()
}

async fn check_host(host: Option<String>, hosts: Arc<AllowedHosts>) -> Result<(), warp::Rejection> {
    match host {
        Some(host) if hosts.is_allowed(&host) => Ok(()),
        other => {
            let host = other.unwrap_or_default();
            LoggingUtils::log_security_event("invalid_host", &host, "unknown");
            Err(warp::reject::custom(AppError::InvalidHost(host)))
        }
    }
}
