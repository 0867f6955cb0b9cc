//! # Group Assembler & Limit Validator
//!
//! Packages predicates into filter groups and enforces the cardinality
//! limits shared by the text-translation and structured entry points.
//!
//! Checks run in a fixed order and the first violation wins:
//! 1. collection is on the allow-list
//! 2. filter group count (hard cap)
//! 3. filters per group (hard cap)
//! 4. total filters (hard cap)
//! 5. page size (soft cap, clamped)
//! 6. a free-text `query` reduces the request to `{query, limit}`

use serde::Deserialize;
use tracing::debug;

use super::collection::Collection;
use super::errors::{QueryError, QueryResult};
use super::limits::{MAX_FILTERS_PER_GROUP, MAX_FILTER_GROUPS, MAX_TOTAL_FILTERS, PAGE_SIZE_CAP};
use super::pagination::{Pagination, DEFAULT_LIMIT};
use super::predicate::{FilterGroup, Predicate, SearchRequest};

/// Caller-supplied structured search body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestInput {
    #[serde(default)]
    pub filter_groups: Option<Vec<FilterGroup>>,

    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub properties: Option<Vec<String>>,

    #[serde(default)]
    pub after: Option<String>,
}

/// A search request that passed validation, bound to its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSearch {
    pub collection: Collection,
    pub request: SearchRequest,
}

/// Build a request from extracted predicates.
///
/// All predicates go into a single AND group; no predicates means no
/// groups. The text form cannot express OR-of-groups.
pub fn assemble(
    predicates: Vec<Predicate>,
    properties: Vec<String>,
    pagination: Pagination,
) -> SearchRequest {
    let filter_groups = if predicates.is_empty() {
        Vec::new()
    } else {
        vec![FilterGroup::new(predicates)]
    };

    SearchRequest {
        query: None,
        filter_groups,
        properties,
        limit: pagination.limit,
        after: pagination.after,
    }
}

/// Resolve a path-selected collection identifier against the allow-list
pub fn resolve_collection(endpoint: &str) -> QueryResult<Collection> {
    endpoint
        .parse()
        .map_err(|_| QueryError::unsupported_endpoint(endpoint))
}

/// Enforce the three hard caps on filter cardinality
pub fn check_limits(groups: &[FilterGroup]) -> QueryResult<()> {
    if !MAX_FILTER_GROUPS.allows(groups.len()) {
        debug!(rule = MAX_FILTER_GROUPS.name, count = groups.len(), "hard cap exceeded");
        return Err(QueryError::TooManyFilterGroups {
            count: groups.len(),
            max: MAX_FILTER_GROUPS.max,
        });
    }

    for (index, group) in groups.iter().enumerate() {
        if !MAX_FILTERS_PER_GROUP.allows(group.len()) {
            debug!(
                rule = MAX_FILTERS_PER_GROUP.name,
                group = index,
                count = group.len(),
                "hard cap exceeded"
            );
            return Err(QueryError::TooManyFiltersInGroup {
                group: index,
                count: group.len(),
                max: MAX_FILTERS_PER_GROUP.max,
            });
        }
    }

    let total: usize = groups.iter().map(FilterGroup::len).sum();
    if !MAX_TOTAL_FILTERS.allows(total) {
        debug!(rule = MAX_TOTAL_FILTERS.name, count = total, "hard cap exceeded");
        return Err(QueryError::TooManyTotalFilters {
            count: total,
            max: MAX_TOTAL_FILTERS.max,
        });
    }

    Ok(())
}

/// Validate a structured search body for `endpoint`.
///
/// A non-empty `query` string takes precedence over structured filters:
/// the result is reduced to `{query, limit}` and everything else is
/// dropped. An empty `query` counts as absent.
pub fn validate(endpoint: &str, body: SearchRequestInput) -> QueryResult<ValidatedSearch> {
    let collection = resolve_collection(endpoint)?;

    let filter_groups = body.filter_groups.unwrap_or_default();
    check_limits(&filter_groups)?;

    let requested = body.limit.unwrap_or(DEFAULT_LIMIT);
    let limit = PAGE_SIZE_CAP.apply(requested);
    if limit != requested {
        debug!(rule = PAGE_SIZE_CAP.name, requested, limit, "soft cap applied");
    }

    let request = match body.query.filter(|q| !q.is_empty()) {
        Some(query) => {
            debug!(collection = %collection, "free-text query supersedes structured filters");
            SearchRequest {
                query: Some(query),
                filter_groups: Vec::new(),
                properties: Vec::new(),
                limit,
                after: None,
            }
        }
        None => SearchRequest {
            query: None,
            filter_groups,
            properties: body
                .properties
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| default_properties(collection)),
            limit,
            after: body.after,
        },
    };

    Ok(ValidatedSearch {
        collection,
        request,
    })
}

/// Owned copy of a collection's default properties
pub fn default_properties(collection: Collection) -> Vec<String> {
    collection
        .default_properties()
        .iter()
        .map(|p| p.to_string())
        .collect()
}
