//! Extraction service — voice transcript → structured form fields.
//!
//! DESIGN
//! ======
//! Sends the transcript to the LLM with a fixed extraction prompt and parses
//! the JSON-mode reply into [`ExtractedFields`]. The transcript may be in
//! any language; the prompt instructs the model to translate values and
//! transliterate proper names into English. Absent fields stay absent — the
//! form only overwrites what was actually extracted.

use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::error::ErrorCode;
use crate::form::ExtractedFields;
use crate::llm::types::{ChatJson, LlmError};
use crate::state::AppState;

const DEFAULT_EXTRACT_MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = r#"You are a precise data extraction assistant for a business document generator.
Your task is to extract structured client and invoice details from a voice transcript.

STRICT EXTRACTION RULES:
1. Extract these fields:
    - clientDetails: { clientName, clientCompany, clientEmail, clientLocality, clientCity, clientPincode, clientState }
    - invoiceDetails: { invoiceNumber, invoiceDate }
    - items: array of { name, rate, quantity }
    - gstList: array of { type (CGST/SGST/IGST), rate }

2. TRANSLATION & NAMES (CRITICAL):
    - Input transcript may be in any language (e.g., Malayalam, Hindi).
    - YOU MUST INTELLIGENTLY TRANSLATE values to English (e.g., "കണ്ണൂർ" -> "Kannur").
    - PROPER NAMES: Transliterate to English script.

3. Return JSON ONLY.
    - Format: { "clientDetails": { ... }, "invoiceDetails": { ... }, "items": [ ... ], "gstList": [ ... ] }
    - If a field is not mentioned, exclude it or set it to null.
    - Do not return markdown code blocks. Just the raw JSON."#;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn extract_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("EXTRACT_MAX_TOKENS", DEFAULT_EXTRACT_MAX_TOKENS))
}

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction is not configured")]
    NotConfigured,
    #[error("no text provided")]
    EmptyText,
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("extracted content was not valid JSON: {0}")]
    Parse(String),
}

impl ErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "E_LLM_NOT_CONFIGURED",
            Self::EmptyText => "E_EMPTY_TEXT",
            Self::Llm(_) => "E_LLM_ERROR",
            Self::RateLimited(_) => "E_RATE_LIMITED",
            Self::Parse(_) => "E_EXTRACT_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Llm(e) if e.retryable()) || matches!(self, Self::RateLimited(_))
    }
}

impl From<crate::rate_limit::RateLimitError> for ExtractionError {
    fn from(e: crate::rate_limit::RateLimitError) -> Self {
        Self::RateLimited(e.to_string())
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one transcript through the extraction model.
///
/// # Errors
///
/// Returns an [`ExtractionError`] for empty input, rate-limit rejection,
/// upstream failure, or an unparseable reply.
pub async fn extract_fields(
    state: &AppState,
    llm: &Arc<dyn ChatJson>,
    client: IpAddr,
    text: &str,
) -> Result<ExtractedFields, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyText);
    }

    state.rate_limiter.check_and_record(client)?;

    info!(%client, transcript_len = text.len(), "extract: request");

    let user = format!("Extract data from this transcript: \"{text}\"");
    let content = llm
        .chat_json(extract_max_tokens(), SYSTEM_PROMPT, &user)
        .await?;

    let fields: ExtractedFields =
        serde_json::from_str(&content).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    info!(
        has_client = fields.client_details.is_some(),
        has_invoice = fields.invoice_details.is_some(),
        items = fields.items.as_ref().map_or(0, Vec::len),
        gst_rows = fields.gst_list.as_ref().map_or(0, Vec::len),
        "extract: fields parsed"
    );

    Ok(fields)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
