//! Structured API errors — grepable codes, retryable flags, JSON bodies.
//!
//! Every failure domain implements [`ErrorCode`]; route handlers pick the
//! HTTP status and delegate the body shape here so clients always see
//! `{ "error", "code", "retryable" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Render an error as the standard JSON error body.
pub fn error_response<E>(status: StatusCode, err: &E) -> Response
where
    E: ErrorCode + ?Sized,
{
    let body = json!({
        "error": err.to_string(),
        "code": err.error_code(),
        "retryable": err.retryable(),
    });
    (status, Json(body)).into_response()
}
