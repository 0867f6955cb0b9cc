//! # Search Backend Boundary
//!
//! The document-search collaborator as seen by the query engine and the
//! REST proxy.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::CrmResult;
use crate::query::{Collection, SearchRequest};

/// One object returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Item {
    /// Whether `name` has a non-null, non-empty value on this object
    pub fn is_populated(&self, name: &str) -> bool {
        match self.properties.get(name) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}

/// Search backend response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default)]
    pub results: Vec<Item>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Value>,
}

/// CRM operations the gateway depends on
#[async_trait]
pub trait CrmBackend: Send + Sync {
    /// Run one search against a collection
    async fn search(&self, collection: Collection, request: &SearchRequest)
        -> CrmResult<SearchResponse>;

    /// List objects of a collection
    async fn list_objects(&self, collection: &str) -> CrmResult<Value>;

    /// Create an object, forwarding the body unchanged
    async fn create_object(&self, collection: &str, body: Value) -> CrmResult<Value>;

    /// Patch an object, forwarding the body unchanged
    async fn update_object(&self, collection: &str, id: &str, body: Value) -> CrmResult<Value>;

    /// Delete an object
    async fn delete_object(&self, collection: &str, id: &str) -> CrmResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_populated() {
        let item: Item = serde_json::from_value(json!({
            "id": "1",
            "properties": {"email": "a@b.com", "phone": "", "company": null, "age": 3}
        }))
        .unwrap();
        assert!(item.is_populated("email"));
        assert!(item.is_populated("age"));
        assert!(!item.is_populated("phone"));
        assert!(!item.is_populated("company"));
        assert!(!item.is_populated("missing"));
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let resp: SearchResponse = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(resp.total, None);
        assert!(resp.results.is_empty());
    }
}
