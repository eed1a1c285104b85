//! Document generation route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::error::error_response;
use crate::form::DocumentForm;
use crate::services::document::{self, DocumentError};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub file_name: String,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
    pub message: String,
}

/// `POST /api/documents` — validate, render via the webhook, and return the
/// canonical document result.
pub async fn generate(State(state): State<AppState>, Json(form): Json<DocumentForm>) -> Response {
    match document::generate_document(&state, &form).await {
        Ok(result) => Json(GenerateResponse {
            success: true,
            file_name: result.file_name,
            download_url: result.download_url,
            view_url: result.view_url,
            message: result
                .message
                .unwrap_or_else(|| "Document generated successfully".to_string()),
        })
        .into_response(),
        Err(e) => error_response(document_status(&e), &e),
    }
}

fn document_status(err: &DocumentError) -> StatusCode {
    match err {
        DocumentError::Validation(_) => StatusCode::BAD_REQUEST,
        DocumentError::Submission(_) | DocumentError::NoDocumentUrl(_) => StatusCode::BAD_GATEWAY,
    }
}
