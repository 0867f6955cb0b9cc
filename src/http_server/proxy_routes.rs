//! CRM Proxy Routes
//!
//! Thin forwarding of CRUD calls to the CRM backend. Bodies pass through
//! unchanged; the backend attaches credentials.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use super::errors::GatewayResult;
use super::server::AppState;

#[derive(Debug, Serialize)]
pub struct ProxyResponse {
    pub success: bool,
    pub data: Value,
}

impl ProxyResponse {
    fn ok(data: Value) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Create proxy routes
pub fn proxy_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:collection", get(list_handler).post(create_handler))
        .route("/:collection/:id", patch(update_handler).delete(delete_handler))
        .with_state(state)
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> GatewayResult<Json<ProxyResponse>> {
    let data = state.backend()?.list_objects(&collection).await?;
    Ok(ProxyResponse::ok(data))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> GatewayResult<Json<ProxyResponse>> {
    let data = state.backend()?.create_object(&collection, body).await?;
    info!(%collection, "object created");
    Ok(ProxyResponse::ok(data))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> GatewayResult<Json<ProxyResponse>> {
    let data = state
        .backend()?
        .update_object(&collection, &id, body)
        .await?;
    Ok(ProxyResponse::ok(data))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> GatewayResult<Json<ProxyResponse>> {
    state.backend()?.delete_object(&collection, &id).await?;
    info!(%collection, %id, "object deleted");
    Ok(ProxyResponse::ok(json!({ "deleted": true, "id": id })))
}
