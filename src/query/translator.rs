//! # Translation Orchestrator
//!
//! Turns GraphQL-flavoured query text into a validated search request,
//! runs it against the backend and remaps the results into the caller's
//! `{ <collection>: { items, total } }` shape with a cost budget.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::collection::Collection;
use super::cost::{CostAccountant, CostBudget, RequestKind};
use super::errors::{QueryError, QueryResult};
use super::extractor::extract;
use super::pagination::extract_pagination;
use super::predicate::SearchRequest;
use super::validator::{assemble, check_limits, default_properties};
use crate::crm::{CrmBackend, CrmResult, SearchResponse};

/// Query text translated into a backend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedQuery {
    pub collection: Collection,
    pub request: SearchRequest,
}

/// Remapped search results
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub collection: Collection,
    pub items: Vec<Value>,
    pub total: u64,
    pub budget: CostBudget,
}

impl Translation {
    /// `{ <collection>: { items, total } }`
    pub fn data(&self) -> Value {
        let mut data = Map::new();
        data.insert(
            self.collection.as_str().to_string(),
            json!({ "items": self.items, "total": self.total }),
        );
        Value::Object(data)
    }
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("word pattern"))
}

fn selection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bitems\s*\{([^}]*)\}").expect("selection pattern"))
}

/// First word of the query that names a supported collection
pub fn detect_collection(raw: &str) -> QueryResult<Collection> {
    word_regex()
        .find_iter(raw)
        .find_map(|m| m.as_str().parse::<Collection>().ok())
        .ok_or(QueryError::MissingCollection)
}

/// Properties named in an `items { ... }` selection, without `id`
pub fn selected_properties(raw: &str) -> Option<Vec<String>> {
    let caps = selection_regex().captures(raw)?;
    let fields: Vec<String> = word_regex()
        .find_iter(&caps[1])
        .map(|m| m.as_str())
        .filter(|f| *f != "id")
        .map(str::to_string)
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

/// Translate query text into a bounded search request without calling
/// the backend.
pub fn translate(raw: &str) -> QueryResult<TranslatedQuery> {
    let collection = detect_collection(raw)?;
    let predicates = extract(raw);
    let pagination = extract_pagination(raw);
    let properties = selected_properties(raw).unwrap_or_else(|| default_properties(collection));

    debug!(
        %collection,
        predicates = predicates.len(),
        limit = pagination.limit,
        "translated query text"
    );

    let request = assemble(predicates, properties, pagination);
    check_limits(&request.filter_groups)?;

    Ok(TranslatedQuery {
        collection,
        request,
    })
}

/// Remap backend items to `{ id, <property>: value }`, charging cost as
/// each property is copied.
pub fn remap(response: &SearchResponse, properties: &[String]) -> (Vec<Value>, CostBudget) {
    let mut accountant = CostAccountant::new();
    accountant.charge_request(RequestKind::CollectionSearch);

    let items = response
        .results
        .iter()
        .map(|item| {
            accountant.charge_object();
            let mut out = Map::new();
            out.insert("id".to_string(), Value::String(item.id.clone()));
            for name in properties {
                accountant.charge_property(item.is_populated(name));
                let value = item.properties.get(name).cloned().unwrap_or(Value::Null);
                out.insert(name.clone(), value);
            }
            Value::Object(out)
        })
        .collect();

    (items, accountant.budget())
}

/// Run an already translated query: one search, then remap.
pub async fn run(backend: &dyn CrmBackend, translated: TranslatedQuery) -> CrmResult<Translation> {
    let TranslatedQuery {
        collection,
        request,
    } = translated;

    let response = backend.search(collection, &request).await?;
    let (items, budget) = remap(&response, &request.properties);
    let total = response.total.unwrap_or(items.len() as u64);

    info!(
        %collection,
        returned = items.len(),
        total,
        cost = budget.used,
        "query translated and executed"
    );

    Ok(Translation {
        collection,
        items,
        total,
        budget,
    })
}
