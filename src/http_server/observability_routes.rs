//! Observability HTTP Routes
//!
//! Health check and endpoint index.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use super::server::AppState;
use crate::query::Collection;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    pub crm_configured: bool,
}

/// Create health and index routes
pub fn observability_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        crm_configured: state.is_configured(),
    };

    (StatusCode::OK, Json(response))
}

async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "name": "crmgate",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "search": "POST /api/search/:collection",
            "graphql": "POST /graphql",
            "crm_list": "GET /api/hubspot/:collection",
            "crm_create": "POST /api/hubspot/:collection",
            "crm_update": "PATCH /api/hubspot/:collection/:id",
            "crm_delete": "DELETE /api/hubspot/:collection/:id",
            "webhook": "POST /webhooks/:source",
            "webhook_url": "GET /webhooks/url/:source"
        },
        "collections": Collection::supported_identifiers(),
    }))
}
