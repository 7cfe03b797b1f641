//! HTTP utilities - Common helper functions
//!
//! Dependency injection into routes and client identification.

use crate::application::use_cases::{HealthCheckUseCase, SubmitContactUseCase};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

/// Client address used for rate limiting and logs.
///
/// Each proxy in front of the server appends the address it received the
/// request from to `X-Forwarded-For`, so only the last `trusted_hops` entries
/// are trustworthy. The entry `trusted_hops` places from the end is the
/// client. With no trusted hops, or too few entries, the peer address of the
/// connection is used instead.
pub fn client_ip(
    trusted_hops: usize,
) -> impl Filter<Extract = (String,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("x-forwarded-for")
        .and(warp::addr::remote())
        .map(move |forwarded: Option<String>, remote: Option<SocketAddr>| {
            forwarded
                .as_deref()
                .and_then(|header| trusted_forwarded_address(header, trusted_hops))
                .or_else(|| remote.map(|addr| addr.ip().to_string()))
                .unwrap_or_else(|| "unknown".to_string())
        })
}

fn trusted_forwarded_address(header: &str, trusted_hops: usize) -> Option<String> {
    if trusted_hops == 0 {
        return None;
    }
    let entries: Vec<&str> = header.split(',').map(str::trim).collect();
    let index = entries.len().checked_sub(trusted_hops)?;
    entries
        .get(index)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.to_string())
}

/// Helper function to inject contact use case into route
pub fn with_contact_use_case(
    use_case: Arc<SubmitContactUseCase>,
) -> impl Filter<Extract = (Arc<SubmitContactUseCase>,), Error = Infallible> + Clone {
    warp::any().map(move || use_case.clone())
}

/// Helper function to inject health use case into route
pub fn with_health_use_case(
    use_case: Arc<HealthCheckUseCase>,
) -> impl Filter<Extract = (Arc<HealthCheckUseCase>,), Error = Infallible> + Clone {
    warp::any().map(move || use_case.clone())
}
