//! Query Translation Routes
//!
//! `POST /graphql` accepts GraphQL-flavoured query text, translates it into
//! a bounded search and answers in GraphQL response shape. Errors are
//! reported in `errors` with status 200.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::errors::GatewayError;
use super::server::AppState;
use crate::query::{run, translate, CostAccountant, CostBudget};

#[derive(Debug, Deserialize)]
pub struct GraphqlRequest {
    #[serde(default)]
    pub query: String,
    /// Accepted for client compatibility; not interpolated
    #[serde(default)]
    pub variables: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Extensions {
    pub query_complexity: CostBudget,
}

#[derive(Debug, Serialize)]
pub struct GraphqlErrorExtensions {
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GraphqlError {
    pub message: String,
    pub extensions: GraphqlErrorExtensions,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GraphqlResponse {
    Data {
        data: Value,
        extensions: Extensions,
    },
    Errors {
        errors: Vec<GraphqlError>,
        extensions: Extensions,
    },
}

impl GraphqlResponse {
    fn failure(err: GatewayError) -> Self {
        GraphqlResponse::Errors {
            errors: vec![GraphqlError {
                message: err.to_string(),
                extensions: GraphqlErrorExtensions { code: err.code() },
            }],
            extensions: Extensions {
                query_complexity: CostAccountant::new().budget(),
            },
        }
    }
}

/// Create translation routes
pub fn graphql_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/graphql", post(graphql_handler))
        .with_state(state)
}

/// Parse the request body. Content type is not checked.
fn parse_request(body: &[u8]) -> Result<GraphqlRequest, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidBody(e.to_string()))
}

async fn graphql_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Json<GraphqlResponse> {
    let request = match parse_request(&body) {
        Ok(r) => r,
        Err(e) => return Json(GraphqlResponse::failure(e)),
    };

    debug!(query = %request.query, "graphql query received");

    let translated = match translate(&request.query) {
        Ok(t) => t,
        Err(e) => return Json(GraphqlResponse::failure(e.into())),
    };

    let backend = match state.backend() {
        Ok(b) => b,
        Err(e) => return Json(GraphqlResponse::failure(e.into())),
    };

    match run(backend, translated).await {
        Ok(translation) => Json(GraphqlResponse::Data {
            data: translation.data(),
            extensions: Extensions {
                query_complexity: translation.budget,
            },
        }),
        Err(e) => Json(GraphqlResponse::failure(e.into())),
    }
}
