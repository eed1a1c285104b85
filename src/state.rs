//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. Both
//! external collaborators sit behind trait objects so the service layer can
//! be exercised with mocks.

use std::sync::Arc;

use crate::llm::types::ChatJson;
use crate::rate_limit::RateLimiter;
use crate::webhook::DocumentRender;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    /// Optional extraction client. `None` if LLM env vars are not configured.
    pub extractor: Option<Arc<dyn ChatJson>>,
    /// The document-rendering webhook.
    pub webhook: Arc<dyn DocumentRender>,
    /// In-memory rate limiter for extraction requests.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(extractor: Option<Arc<dyn ChatJson>>, webhook: Arc<dyn DocumentRender>) -> Self {
        Self { extractor, webhook, rate_limiter: RateLimiter::new() }
    }
}
