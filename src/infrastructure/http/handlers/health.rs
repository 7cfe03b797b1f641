//! Health check handler

use crate::application::use_cases::HealthCheckUseCase;
use std::sync::Arc;
use warp::Reply;

/// Handle health check requests
pub async fn handle_health_request(
    health_use_case: Arc<HealthCheckUseCase>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let health_response = health_use_case.execute().await.map_err(warp::reject::custom)?;
    Ok(warp::reply::json(&health_response))
}
