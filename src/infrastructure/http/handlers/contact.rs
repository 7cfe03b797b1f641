//! Contact form handler

use crate::{
    application::use_cases::SubmitContactUseCase,
    infrastructure::http::responses::{ResponseFormatter, CONTACT_SUCCESS_MESSAGE},
    shared::logging::LoggingUtils,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use warp::Reply;

/// Handle a contact form submission
pub async fn handle_contact_request(
    payload: Value,
    client_ip: String,
    user_agent: Option<String>,
    use_case: Arc<SubmitContactUseCase>,
) -> Result<impl Reply, warp::reject::Rejection> {
    let start_time = Instant::now();
    let request_id = LoggingUtils::generate_request_id();
    LoggingUtils::log_submission(&request_id, &client_ip, user_agent.as_deref());

    match use_case.execute(&payload).await {
        Ok(_) => {
            LoggingUtils::log_success(&request_id, start_time.elapsed().as_millis() as u64);
            Ok(ResponseFormatter::message(CONTACT_SUCCESS_MESSAGE))
        }
        Err(e) => {
            LoggingUtils::log_error(&request_id, &e, start_time.elapsed().as_millis() as u64);
            Err(warp::reject::custom(e))
        }
    }
}
