mod error;
mod form;
mod llm;
mod normalize;
mod payload;
mod rate_limit;
mod routes;
mod services;
mod state;
mod totals;
mod webhook;

use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let webhook_url = std::env::var("WEBHOOK_URL").expect("WEBHOOK_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let webhook = webhook::WebhookClient::new(webhook_url).expect("webhook client init failed");

    // Extraction client (non-fatal: voice prefill disabled if config missing).
    let extractor = match llm::client_from_env() {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "extraction client not configured — transcript prefill disabled");
            None
        }
    };

    let state = state::AppState::new(extractor, Arc::new(webhook));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "docsmith listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
