//! LLM — client plumbing for transcript extraction.
//!
//! DESIGN
//! ======
//! Extraction is consumed as a black-box text → structured-JSON function.
//! The concrete client speaks the OpenAI chat-completions dialect (Groq by
//! default); everything downstream depends only on the [`types::ChatJson`]
//! trait so tests can substitute a mock.

pub mod openai;
pub mod types;

use std::sync::Arc;

use types::{ChatJson, LlmError};

/// Build the extraction client from environment variables.
///
/// - `LLM_API_KEY`: provider API key (required)
/// - `LLM_MODEL`: model id (defaults to the Groq extraction model)
/// - `LLM_BASE_URL`: custom base URL for OpenAI-compatible APIs
///
/// # Errors
///
/// Returns an error if the API key is missing or the HTTP client fails.
pub fn client_from_env() -> Result<Arc<dyn ChatJson>, LlmError> {
    let api_key =
        std::env::var("LLM_API_KEY").map_err(|_| LlmError::MissingApiKey { var: "LLM_API_KEY".into() })?;
    let model = std::env::var("LLM_MODEL").ok();
    let base_url = std::env::var("LLM_BASE_URL").ok();
    let client = openai::OpenAiClient::new(api_key, model.as_deref(), base_url.as_deref())?;
    tracing::info!(model = client.model(), "extraction client initialized");
    Ok(Arc::new(client))
}
