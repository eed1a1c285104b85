//! Document service — validate, total, flatten, render, normalize.
//!
//! DESIGN
//! ======
//! The full submission pipeline behind `POST /api/documents`. Each stage is
//! a pure function from its own module; this service only sequences them,
//! talks to the webhook, and logs with a per-submission id. One attempt, no
//! retries — the form re-triggers on user action.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::form::{DocumentForm, ValidationError};
use crate::normalize::{self, DocumentResult, NormalizationFailure};
use crate::payload;
use crate::state::AppState;
use crate::totals;
use crate::webhook::SubmissionError;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    NoDocumentUrl(#[from] NormalizationFailure),
}

impl ErrorCode for DocumentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Submission(e) => e.error_code(),
            Self::NoDocumentUrl(_) => "E_NO_DOCUMENT_URL",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Submission(e) if e.retryable())
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one form submission end to end and return the canonical result.
///
/// # Errors
///
/// Returns a [`DocumentError`] for invalid fields, webhook transport
/// failures, or a webhook response with no usable document URL.
pub async fn generate_document(
    state: &AppState,
    form: &DocumentForm,
) -> Result<DocumentResult, DocumentError> {
    form.validate()?;

    let submission_id = Uuid::new_v4();
    let aggregate = totals::aggregate(&form.items, &form.gst_list);
    info!(
        %submission_id,
        document_type = form.document_type.as_str(),
        items = form.items.len(),
        gst_rows = form.gst_list.len(),
        subtotal = aggregate.subtotal,
        grand_total = aggregate.grand_total,
        "document: submitting"
    );

    let wire = payload::build_payload(form, &aggregate);
    let raw = state.webhook.render(&wire).await?;

    match normalize::normalize(&raw) {
        Ok(result) => {
            info!(%submission_id, file_name = %result.file_name, "document: rendered");
            Ok(result)
        }
        Err(e) => {
            warn!(%submission_id, "document: webhook responded without a usable document URL");
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
