//! # Predicate Model
//!
//! Predicates, filter groups and the canonical search request sent to the
//! search backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operator::Operator;

/// A comparison together with the value shape its operator requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq(String),
    Neq(String),
    Lt(String),
    Lte(String),
    Gt(String),
    Gte(String),
    ContainsToken(String),
    NotContainsToken(String),
    In(Vec<String>),
    NotIn(Vec<String>),
    /// Value is optional on the wire and forwarded only when given
    HasProperty(Option<String>),
    NotHasProperty(Option<String>),
    Between { low: String, high: String },
}

impl Condition {
    /// Build a condition from an operator and a single textual value.
    ///
    /// List operators wrap the value in a one-element list. Returns `None`
    /// for `Between`, which needs two values.
    pub fn from_scalar(operator: Operator, value: String) -> Option<Self> {
        let condition = match operator {
            Operator::Eq => Condition::Eq(value),
            Operator::Neq => Condition::Neq(value),
            Operator::Lt => Condition::Lt(value),
            Operator::Lte => Condition::Lte(value),
            Operator::Gt => Condition::Gt(value),
            Operator::Gte => Condition::Gte(value),
            Operator::ContainsToken => Condition::ContainsToken(value),
            Operator::NotContainsToken => Condition::NotContainsToken(value),
            Operator::In => Condition::In(vec![value]),
            Operator::NotIn => Condition::NotIn(vec![value]),
            Operator::HasProperty => Condition::HasProperty(Some(value)),
            Operator::NotHasProperty => Condition::NotHasProperty(Some(value)),
            Operator::Between => return None,
        };
        Some(condition)
    }

    /// Build a list condition. Returns `None` for non-list operators.
    pub fn from_list(operator: Operator, values: Vec<String>) -> Option<Self> {
        match operator {
            Operator::In => Some(Condition::In(values)),
            Operator::NotIn => Some(Condition::NotIn(values)),
            _ => None,
        }
    }

    /// The operator code of this condition
    pub fn operator(&self) -> Operator {
        match self {
            Condition::Eq(_) => Operator::Eq,
            Condition::Neq(_) => Operator::Neq,
            Condition::Lt(_) => Operator::Lt,
            Condition::Lte(_) => Operator::Lte,
            Condition::Gt(_) => Operator::Gt,
            Condition::Gte(_) => Operator::Gte,
            Condition::ContainsToken(_) => Operator::ContainsToken,
            Condition::NotContainsToken(_) => Operator::NotContainsToken,
            Condition::In(_) => Operator::In,
            Condition::NotIn(_) => Operator::NotIn,
            Condition::HasProperty(_) => Operator::HasProperty,
            Condition::NotHasProperty(_) => Operator::NotHasProperty,
            Condition::Between { .. } => Operator::Between,
        }
    }
}

/// One field/operator/value constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WirePredicate", try_from = "WirePredicate")]
pub struct Predicate {
    /// Bare field name, suffix stripped
    pub property_name: String,

    /// Operator and value(s)
    pub condition: Condition,
}

impl Predicate {
    pub fn new(property_name: impl Into<String>, condition: Condition) -> Self {
        Self {
            property_name: property_name.into(),
            condition,
        }
    }

    pub fn operator(&self) -> Operator {
        self.condition.operator()
    }
}

/// Backend wire form of a predicate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePredicate {
    property_name: String,
    operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    high_value: Option<Value>,
}

impl From<Predicate> for WirePredicate {
    fn from(p: Predicate) -> Self {
        let operator = p.operator();
        let (value, values, high_value) = match p.condition {
            Condition::In(list) | Condition::NotIn(list) => {
                (None, Some(list.into_iter().map(Value::String).collect()), None)
            }
            Condition::Between { low, high } => {
                (Some(Value::String(low)), None, Some(Value::String(high)))
            }
            Condition::Eq(v)
            | Condition::Neq(v)
            | Condition::Lt(v)
            | Condition::Lte(v)
            | Condition::Gt(v)
            | Condition::Gte(v)
            | Condition::ContainsToken(v)
            | Condition::NotContainsToken(v) => (Some(Value::String(v)), None, None),
            Condition::HasProperty(v) | Condition::NotHasProperty(v) => {
                (v.map(Value::String), None, None)
            }
        };
        Self {
            property_name: p.property_name,
            operator,
            value,
            values,
            high_value,
        }
    }
}

impl TryFrom<WirePredicate> for Predicate {
    type Error = String;

    fn try_from(w: WirePredicate) -> Result<Self, Self::Error> {
        let field = &w.property_name;
        let condition = match w.operator {
            Operator::In | Operator::NotIn => {
                let values = w
                    .values
                    .ok_or_else(|| format!("{} on '{}' requires 'values'", w.operator.as_str(), field))?
                    .iter()
                    .map(scalar_text)
                    .collect::<Result<Vec<_>, _>>()?;
                Condition::from_list(w.operator, values)
            }
            Operator::Between => {
                let low = w
                    .value
                    .as_ref()
                    .ok_or_else(|| format!("BETWEEN on '{}' requires 'value'", field))?;
                let high = w
                    .high_value
                    .as_ref()
                    .ok_or_else(|| format!("BETWEEN on '{}' requires 'highValue'", field))?;
                Some(Condition::Between {
                    low: scalar_text(low)?,
                    high: scalar_text(high)?,
                })
            }
            Operator::HasProperty | Operator::NotHasProperty => {
                let value = w.value.as_ref().map(scalar_text).transpose()?;
                Some(match w.operator {
                    Operator::HasProperty => Condition::HasProperty(value),
                    _ => Condition::NotHasProperty(value),
                })
            }
            op => {
                let value = w
                    .value
                    .as_ref()
                    .ok_or_else(|| format!("{} on '{}' requires 'value'", op.as_str(), field))?;
                Condition::from_scalar(op, scalar_text(value)?)
            }
        };
        let condition =
            condition.ok_or_else(|| format!("invalid operator for '{}'", w.property_name))?;
        Ok(Predicate::new(w.property_name, condition))
    }
}

/// Stringify a scalar JSON value
fn scalar_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a scalar filter value, got {}", other)),
    }
}

/// A set of predicates combined with AND semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(default)]
    pub filters: Vec<Predicate>,
}

impl FilterGroup {
    pub fn new(filters: Vec<Predicate>) -> Self {
        Self { filters }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Validated, bounded request for the search backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text search; set only on the reduced `{query, limit}` form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter_groups: Vec<FilterGroup>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,

    pub limit: i64,

    /// Opaque pagination cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl SearchRequest {
    /// Total number of predicates across all groups
    pub fn total_filters(&self) -> usize {
        self.filter_groups.iter().map(FilterGroup::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_wire_form() {
        let p = Predicate::new("email", Condition::Eq("a@b.com".to_string()));
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"propertyName": "email", "operator": "EQ", "value": "a@b.com"})
        );
    }

    #[test]
    fn test_between_wire_form() {
        let p = Predicate::new(
            "amount",
            Condition::Between {
                low: "5".to_string(),
                high: "10".to_string(),
            },
        );
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"propertyName": "amount", "operator": "BETWEEN", "value": "5", "highValue": "10"})
        );
    }

    #[test]
    fn test_list_wire_form() {
        let p = Predicate::new("tags", Condition::NotIn(vec!["a".into(), "b".into()]));
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"propertyName": "tags", "operator": "NOT_IN", "values": ["a", "b"]})
        );
    }

    #[test]
    fn test_deserialize_numeric_value() {
        let p: Predicate =
            serde_json::from_value(json!({"propertyName": "amount", "operator": "GT", "value": 100}))
                .unwrap();
        assert_eq!(p.condition, Condition::Gt("100".to_string()));
    }

    #[test]
    fn test_deserialize_valueless_has_property() {
        let p: Predicate =
            serde_json::from_value(json!({"propertyName": "phone", "operator": "HAS_PROPERTY"}))
                .unwrap();
        assert_eq!(p.condition, Condition::HasProperty(None));
    }

    #[test]
    fn test_valueless_has_property_forwarded_unchanged() {
        for wire in [
            json!({"propertyName": "phone", "operator": "HAS_PROPERTY"}),
            json!({"propertyName": "phone", "operator": "NOT_HAS_PROPERTY"}),
            json!({"propertyName": "phone", "operator": "HAS_PROPERTY", "value": ""}),
        ] {
            let p: Predicate = serde_json::from_value(wire.clone()).unwrap();
            assert_eq!(serde_json::to_value(&p).unwrap(), wire);
        }
    }

    #[test]
    fn test_deserialize_shape_mismatch() {
        let missing_values =
            serde_json::from_value::<Predicate>(json!({"propertyName": "t", "operator": "IN", "value": "a"}));
        assert!(missing_values.is_err());

        let missing_high = serde_json::from_value::<Predicate>(
            json!({"propertyName": "a", "operator": "BETWEEN", "value": "1"}),
        );
        assert!(missing_high.is_err());
    }

    #[test]
    fn test_from_scalar_wraps_list_operators() {
        assert_eq!(
            Condition::from_scalar(Operator::In, "x".into()),
            Some(Condition::In(vec!["x".into()]))
        );
        assert_eq!(Condition::from_scalar(Operator::Between, "x".into()), None);
    }

    #[test]
    fn test_request_skips_empty_parts() {
        let req = SearchRequest {
            query: Some("foo".to_string()),
            filter_groups: vec![],
            properties: vec![],
            limit: 10,
            after: None,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"query": "foo", "limit": 10}));
    }
}
