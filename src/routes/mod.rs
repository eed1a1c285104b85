//! Router assembly.
//!
//! API routes plus the static form UI: `/api/*` is the JSON surface the
//! form talks to, everything else falls through to `ServeDir` so the built
//! frontend can be dropped next to the binary.

pub mod documents;
pub mod extract;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_service = ServeDir::new(static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/extract", post(extract::extract))
        .route("/api/documents", post(documents::generate))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .fallback_service(static_service)
}

/// Resolve the static form UI directory.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
