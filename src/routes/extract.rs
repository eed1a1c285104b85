//! Transcript extraction route.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::error::error_response;
use crate::form::ExtractedFields;
use crate::services::extract::{self, ExtractionError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ExtractBody {
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: ExtractedFields,
}

/// `POST /api/extract` — turn a voice transcript into form field values.
pub async fn extract(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<ExtractBody>,
) -> Response {
    let Some(llm) = state.extractor.as_ref() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, &ExtractionError::NotConfigured);
    };

    let text = body.text.unwrap_or_default();
    match extract::extract_fields(&state, llm, addr.ip(), &text).await {
        Ok(data) => Json(ExtractResponse { success: true, data }).into_response(),
        Err(e) => error_response(extraction_status(&e), &e),
    }
}

fn extraction_status(err: &ExtractionError) -> StatusCode {
    match err {
        ExtractionError::EmptyText => StatusCode::BAD_REQUEST,
        ExtractionError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        ExtractionError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ExtractionError::Llm(_) | ExtractionError::Parse(_) => StatusCode::BAD_GATEWAY,
    }
}
