//! HTTP responses module
//!
//! JSON response bodies and the rejection handler that turns every failure
//! into one of them.

use crate::{domain::contact::FieldErrors, shared::error::AppError};
use serde_json::json;
use std::convert::Infallible;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::reply::{Json, Reply, Response, WithStatus};

pub const CONTACT_SUCCESS_MESSAGE: &str = "Your message has been sent.";
pub const CONTACT_FAILURE_MESSAGE: &str = "Your message could not be sent. Please try again later.";
pub const INVALID_HOST_MESSAGE: &str = "Invalid host header";
pub const THROTTLED_MESSAGE: &str = "Request was throttled.";

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// `{"message": ...}` with status 200
    pub fn message(message: &str) -> Json {
        warp::reply::json(&json!({ "message": message }))
    }

    /// `{"error": ...}` with the given status
    pub fn error(message: &str, status: StatusCode) -> WithStatus<Json> {
        warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
    }

    /// Field errors keyed by field name, status 400
    pub fn validation(errors: &FieldErrors) -> WithStatus<Json> {
        warp::reply::with_status(warp::reply::json(errors), StatusCode::BAD_REQUEST)
    }

    /// Format an application error. Server-side causes are only exposed when
    /// `debug` is set.
    pub fn from_app_error(err: &AppError, debug: bool) -> WithStatus<Json> {
        let status = err.http_status_code();
        match err {
            AppError::Validation(errors) => Self::validation(errors),
            AppError::InvalidHost(_) => Self::error(INVALID_HOST_MESSAGE, status),
            AppError::RateLimit => Self::error(THROTTLED_MESSAGE, status),
            other if debug => warp::reply::with_status(
                warp::reply::json(&json!({
                    "error": CONTACT_FAILURE_MESSAGE,
                    "detail": other.to_string(),
                })),
                status,
            ),
            _ => Self::error(CONTACT_FAILURE_MESSAGE, status),
        }
    }
}

/// Recover from any rejection with a JSON body
pub async fn handle_rejection(err: warp::Rejection, debug: bool) -> Result<Response, Infallible> {
    if let Some(app_error) = err.find::<AppError>() {
        if !app_error.is_client_error() {
            error!(error = %app_error, "Request failed");
        }
        return Ok(ResponseFormatter::from_app_error(app_error, debug).into_response());
    }

    let (message, status) = if err.is_not_found() {
        ("Not found.".to_string(), StatusCode::NOT_FOUND)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        debug!(error = %e, "Malformed request body");
        (format!("JSON parse error - {}", e), StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ("Request body too large.".to_string(), StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        ("Content-Length header is required.".to_string(), StatusCode::LENGTH_REQUIRED)
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        ("Unsupported media type.".to_string(), StatusCode::UNSUPPORTED_MEDIA_TYPE)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ("Method not allowed.".to_string(), StatusCode::METHOD_NOT_ALLOWED)
    } else {
        error!(rejection = ?err, "Unhandled rejection");
        ("Internal server error.".to_string(), StatusCode::INTERNAL_SERVER_ERROR)
    };

    Ok(ResponseFormatter::error(&message, status).into_response())
}
