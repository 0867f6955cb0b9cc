//! # Query Errors
//!
//! Failures detected locally while translating or validating a search.
//! None of these ever reach the search backend.

use thiserror::Error;

use super::collection::Collection;

/// Result type for query engine operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Collection is not on the allow-list
    #[error("Unsupported endpoint '{endpoint}'")]
    UnsupportedEndpoint { endpoint: String },

    /// More filter groups than allowed
    #[error("Too many filter groups: {count} (max {max})")]
    TooManyFilterGroups { count: usize, max: usize },

    /// A single group holds too many filters
    #[error("Too many filters in group {group}: {count} (max {max})")]
    TooManyFiltersInGroup {
        group: usize,
        count: usize,
        max: usize,
    },

    /// Filters across all groups exceed the total cap
    #[error("Too many total filters: {count} (max {max})")]
    TooManyTotalFilters { count: usize, max: usize },

    /// Query text names no supported collection
    #[error("Query does not name a supported collection")]
    MissingCollection,
}

impl QueryError {
    pub fn unsupported_endpoint(endpoint: impl Into<String>) -> Self {
        QueryError::UnsupportedEndpoint {
            endpoint: endpoint.into(),
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UnsupportedEndpoint { .. } => "CRM_QUERY_UNSUPPORTED_ENDPOINT",
            QueryError::TooManyFilterGroups { .. } => "CRM_QUERY_TOO_MANY_FILTER_GROUPS",
            QueryError::TooManyFiltersInGroup { .. } => "CRM_QUERY_TOO_MANY_FILTERS_IN_GROUP",
            QueryError::TooManyTotalFilters { .. } => "CRM_QUERY_TOO_MANY_TOTAL_FILTERS",
            QueryError::MissingCollection => "CRM_QUERY_MISSING_COLLECTION",
        }
    }

    /// Allow-list to echo back to the caller, if this error calls for it
    pub fn supported_endpoints(&self) -> Option<Vec<&'static str>> {
        match self {
            QueryError::UnsupportedEndpoint { .. } | QueryError::MissingCollection => {
                Some(Collection::supported_identifiers())
            }
            _ => None,
        }
    }
}
