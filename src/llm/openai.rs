//! OpenAI-compatible chat client in JSON mode.
//!
//! Targets `/chat/completions` on any OpenAI-compatible host. The default
//! base URL points at Groq, which serves the extraction model the form was
//! tuned against. Requests pin `temperature` to 0 and ask for
//! `response_format: json_object` so the assistant content is machine
//! parseable.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::types::{ChatJson, LlmError};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client. `model` and `base_url` fall back to the Groq defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: String, model: Option<&str>, base_url: Option<&str>) -> Result<Self, LlmError> {
        let base_url = base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url, model: model.unwrap_or(DEFAULT_MODEL).to_string() })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ChatJson for OpenAiClient {
    async fn chat_json(&self, max_tokens: u32, system: &str, user: &str) -> Result<String, LlmError> {
        let messages = [
            CcMessage { role: "system", content: system },
            CcMessage { role: "user", content: user },
        ];
        let body = CcRequest {
            model: &self.model,
            max_tokens,
            temperature: 0.0,
            response_format: ResponseFormat { format_type: "json_object" },
            messages: &messages,
        };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_content(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    response_format: ResponseFormat,
    messages: &'a [CcMessage<'a>],
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_content(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .unwrap_or("");
    if content.is_empty() {
        return Err(LlmError::ApiParse("chat_completions: empty assistant content".to_string()));
    }
    Ok(content.to_string())
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
