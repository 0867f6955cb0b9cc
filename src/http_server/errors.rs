//! # Gateway Errors
//!
//! Error type for HTTP handlers and its JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::crm::CrmError;
use crate::query::QueryError;

/// Result type for gateway handlers
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Query failed local validation
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Body could not be read as a search request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Backend Errors (5xx)
    // ==================
    /// Backend unconfigured or failed
    #[error(transparent)]
    Crm(#[from] CrmError),
}

impl GatewayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Query(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::Crm(CrmError::CredentialMissing) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Crm(CrmError::DownstreamFailure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Query(e) => e.code(),
            GatewayError::InvalidBody(_) => "CRM_GATEWAY_INVALID_BODY",
            GatewayError::Crm(e) => e.code(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<&GatewayError> for ErrorResponse {
    fn from(err: &GatewayError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::from(QueryError::TooManyFilterGroups { count: 6, max: 5 }).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::from(CrmError::CredentialMissing).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::from(CrmError::downstream("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::InvalidBody("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_downstream_message_passthrough() {
        let err = GatewayError::from(CrmError::downstream("HubSpot API error (429): slow down"));
        assert_eq!(err.to_string(), "HubSpot API error (429): slow down");
    }
}
