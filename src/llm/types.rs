//! LLM types — errors and the provider-neutral extraction chat trait.

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for single-shot JSON-mode chat.
/// Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatJson: Send + Sync {
    /// Send one system + user exchange and return the assistant content,
    /// which the provider is instructed to emit as a bare JSON object.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is
    /// malformed, or the provider returns a non-success status.
    async fn chat_json(&self, max_tokens: u32, system: &str, user: &str) -> Result<String, LlmError>;
}
