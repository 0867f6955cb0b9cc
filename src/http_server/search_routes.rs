//! Structured Search Routes
//!
//! `POST /api/search/:collection` validates a caller-supplied search body
//! and forwards it to the CRM backend.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::errors::GatewayError;
use super::server::AppState;
use crate::crm::SearchResponse;
use crate::query::validator::resolve_collection;
use crate::query::{validate, LimitInfo, SearchRequestInput, ValidatedSearch};

/// Search API reference returned with every error
pub const SEARCH_DOCUMENTATION: &str = "https://developers.hubspot.com/docs/api/crm/search";

#[derive(Debug, Serialize)]
pub struct SearchSuccess {
    pub success: bool,
    pub data: SearchResponse,
    pub endpoint: String,
    pub request_body_size: usize,
    pub rate_limit_info: LimitInfo,
}

#[derive(Debug, Serialize)]
pub struct SearchFailure {
    pub error: String,
    pub code: &'static str,
    pub endpoint: String,
    pub documentation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_endpoints: Option<Vec<&'static str>>,
}

impl SearchFailure {
    fn new(err: &GatewayError, endpoint: &str) -> Self {
        let supported_endpoints = match err {
            GatewayError::Query(q) => q.supported_endpoints(),
            _ => None,
        };
        Self {
            error: err.to_string(),
            code: err.code(),
            endpoint: endpoint.to_string(),
            documentation: SEARCH_DOCUMENTATION,
            supported_endpoints,
        }
    }
}

type SearchReply = Result<Json<SearchSuccess>, (StatusCode, Json<SearchFailure>)>;

/// Create structured search routes
pub fn search_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:collection", post(search_handler))
        .with_state(state)
}

/// Parse a body into search input; an empty body is an empty search
fn parse_body(body: &[u8]) -> Result<SearchRequestInput, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SearchRequestInput::default());
    }
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidBody(e.to_string()))
}

/// Validate locally; every check runs before the backend is touched
fn validate_body(endpoint: &str, body: &[u8]) -> Result<ValidatedSearch, GatewayError> {
    resolve_collection(endpoint)?;
    let input = parse_body(body)?;
    Ok(validate(endpoint, input)?)
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Path(endpoint): Path<String>,
    body: Bytes,
) -> SearchReply {
    let fail = |err: GatewayError| (err.status_code(), Json(SearchFailure::new(&err, &endpoint)));

    let ValidatedSearch {
        collection,
        request,
    } = validate_body(&endpoint, &body).map_err(&fail)?;

    let request_body_size = serde_json::to_vec(&request).map(|b| b.len()).unwrap_or(0);

    let backend = state
        .backend()
        .map_err(|e| fail(GatewayError::from(e)))?;
    let data = backend
        .search(collection, &request)
        .await
        .map_err(|e| fail(GatewayError::from(e)))?;

    info!(
        %collection,
        filter_groups = request.filter_groups.len(),
        results = data.results.len(),
        "structured search completed"
    );

    Ok(Json(SearchSuccess {
        success: true,
        data,
        endpoint,
        request_body_size,
        rate_limit_info: LimitInfo::current(),
    }))
}
