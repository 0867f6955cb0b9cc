//! Webhook Routes
//!
//! Accepts webhook deliveries from any named source and logs them. Nothing
//! is stored or forwarded.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookReceipt {
    pub success: bool,
    pub received: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookUrl {
    pub success: bool,
    pub webhook_url: String,
    pub source: String,
}

/// Create webhook routes
pub fn webhook_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:source", post(receive_handler))
        .route("/url/:source", get(url_handler))
        .with_state(state)
}

/// Local delivery URL for `source`
pub fn webhook_url(port: u16, source: &str) -> String {
    format!("http://localhost:{}/webhooks/{}", port, source)
}

async fn receive_handler(Path(source): Path<String>, body: Bytes) -> Json<WebhookReceipt> {
    info!(
        %source,
        bytes = body.len(),
        payload = %String::from_utf8_lossy(&body),
        "webhook received"
    );

    Json(WebhookReceipt {
        success: true,
        received: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        source,
    })
}

async fn url_handler(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Json<WebhookUrl> {
    Json(WebhookUrl {
        success: true,
        webhook_url: webhook_url(state.port(), &source),
        source,
    })
}
