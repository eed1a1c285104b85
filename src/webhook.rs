//! Document webhook client — posts the flattened payload, returns raw JSON.
//!
//! The webhook renders the document and answers with a loosely-shaped JSON
//! body; interpretation of that body lives in [`crate::normalize`]. This
//! module only owns transport: one POST, no retries, failure surfaces
//! immediately.

use serde_json::Value;
use std::time::Duration;

use crate::error::ErrorCode;
use crate::payload::DocumentPayload;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// ERROR
// =============================================================================

/// The document webhook was unreachable or answered outside its contract.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The HTTP request to the webhook failed.
    #[error("webhook request failed: {0}")]
    Request(String),

    /// The webhook returned a non-success HTTP status.
    #[error("webhook returned status {status}")]
    Status { status: u16, body: String },

    /// The webhook body could not be parsed as JSON.
    #[error("webhook response was not JSON: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for SubmissionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_WEBHOOK_REQUEST",
            Self::Status { .. } => "E_WEBHOOK_STATUS",
            Self::Parse(_) => "E_WEBHOOK_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// RENDER TRAIT
// =============================================================================

/// Async seam over the document-rendering webhook. Enables mocking in tests.
#[async_trait::async_trait]
pub trait DocumentRender: Send + Sync {
    /// Post one payload and return the webhook's raw JSON response.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] if the webhook is unreachable, answers
    /// with a non-success status, or sends a non-JSON body.
    async fn render(&self, payload: &DocumentPayload) -> Result<Value, SubmissionError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(url: String) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| SubmissionError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl DocumentRender for WebhookClient {
    async fn render(&self, payload: &DocumentPayload) -> Result<Value, SubmissionError> {
        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SubmissionError::Request(e.to_string()))?;
        if !(200..=299).contains(&status) {
            return Err(SubmissionError::Status { status, body: text });
        }
        serde_json::from_str(&text).map_err(|e| SubmissionError::Parse(e.to_string()))
    }
}
