//! Response helpers used by every entity module.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use escola_config::ApiConfig;
use escola_core::AppError;
use escola_models::MessageResponse;

/// Turns the outcome of a delete into its response.
///
/// Success is `200 {msg: success}`. A failure is logged and answered with
/// `failure`; the status stays 200 while `lenient_delete_errors` is on, and
/// otherwise is the status of the underlying error.
pub fn delete_response(
    result: Result<u64, AppError>,
    api_config: &ApiConfig,
    success: &str,
    failure: &str,
) -> Response {
    match result {
        Ok(_) => Json(MessageResponse::new(success)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Delete failed");
            let status = if api_config.lenient_delete_errors {
                StatusCode::OK
            } else {
                err.status
            };
            (status, Json(MessageResponse::new(failure))).into_response()
        }
    }
}
