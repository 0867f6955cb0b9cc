//! # CRM Backend Errors

use thiserror::Error;

/// Result type for CRM backend operations
pub type CrmResult<T> = Result<T, CrmError>;

/// CRM backend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
    /// No access token configured for the backend
    #[error("HubSpot not configured")]
    CredentialMissing,

    /// Transport or API failure, message passed through verbatim
    #[error("{0}")]
    DownstreamFailure(String),
}

impl CrmError {
    pub fn downstream(msg: impl Into<String>) -> Self {
        CrmError::DownstreamFailure(msg.into())
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CrmError::CredentialMissing => "CRM_BACKEND_CREDENTIAL_MISSING",
            CrmError::DownstreamFailure(_) => "CRM_BACKEND_DOWNSTREAM_FAILURE",
        }
    }
}

impl From<reqwest::Error> for CrmError {
    fn from(e: reqwest::Error) -> Self {
        CrmError::DownstreamFailure(e.to_string())
    }
}
