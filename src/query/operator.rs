//! # Operator Table
//!
//! Static mapping from textual filter suffixes to canonical operator codes.

use serde::{Deserialize, Serialize};

/// Canonical operator codes understood by the search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    ContainsToken,
    NotContainsToken,
    In,
    NotIn,
    HasProperty,
    NotHasProperty,
    Between,
}

/// The value shape an operator carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Exactly one value
    Scalar,
    /// A list of values
    List,
    /// A low/high pair
    Range,
}

impl Operator {
    /// Get the wire code for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::Lt => "LT",
            Operator::Lte => "LTE",
            Operator::Gt => "GT",
            Operator::Gte => "GTE",
            Operator::ContainsToken => "CONTAINS_TOKEN",
            Operator::NotContainsToken => "NOT_CONTAINS_TOKEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::HasProperty => "HAS_PROPERTY",
            Operator::NotHasProperty => "NOT_HAS_PROPERTY",
            Operator::Between => "BETWEEN",
        }
    }

    /// Get the value shape this operator requires
    pub fn shape(&self) -> ValueShape {
        match self {
            Operator::In | Operator::NotIn => ValueShape::List,
            Operator::Between => ValueShape::Range,
            Operator::Eq
            | Operator::Neq
            | Operator::Lt
            | Operator::Lte
            | Operator::Gt
            | Operator::Gte
            | Operator::ContainsToken
            | Operator::NotContainsToken
            | Operator::HasProperty
            | Operator::NotHasProperty => ValueShape::Scalar,
        }
    }
}

/// Suffix table in scan order. `between` is handled as a separate form.
pub const OPERATOR_TABLE: [(&str, Operator); 12] = [
    ("eq", Operator::Eq),
    ("neq", Operator::Neq),
    ("lt", Operator::Lt),
    ("lte", Operator::Lte),
    ("gt", Operator::Gt),
    ("gte", Operator::Gte),
    ("contains", Operator::ContainsToken),
    ("not_contains", Operator::NotContainsToken),
    ("in", Operator::In),
    ("not_in", Operator::NotIn),
    ("null", Operator::HasProperty),
    ("not_null", Operator::NotHasProperty),
];

/// Suffix of the two-valued range form
pub const BETWEEN_SUFFIX: &str = "between";

/// Resolve a filter suffix to its operator code
pub fn resolve(suffix: &str) -> Option<Operator> {
    if suffix == BETWEEN_SUFFIX {
        return Some(Operator::Between);
    }
    OPERATOR_TABLE
        .iter()
        .find(|(s, _)| *s == suffix)
        .map(|(_, op)| *op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_suffixes() {
        assert_eq!(resolve("eq"), Some(Operator::Eq));
        assert_eq!(resolve("contains"), Some(Operator::ContainsToken));
        assert_eq!(resolve("null"), Some(Operator::HasProperty));
        assert_eq!(resolve("not_null"), Some(Operator::NotHasProperty));
        assert_eq!(resolve("between"), Some(Operator::Between));
    }

    #[test]
    fn test_resolve_unknown_suffix() {
        assert_eq!(resolve("like"), None);
        assert_eq!(resolve("EQ"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Operator::In.shape(), ValueShape::List);
        assert_eq!(Operator::NotIn.shape(), ValueShape::List);
        assert_eq!(Operator::Between.shape(), ValueShape::Range);
        assert_eq!(Operator::Gte.shape(), ValueShape::Scalar);
    }

    #[test]
    fn test_wire_codes_match_serde() {
        for (_, op) in OPERATOR_TABLE {
            let json = serde_json::to_value(op).unwrap();
            assert_eq!(json, serde_json::json!(op.as_str()));
        }
        assert_eq!(
            serde_json::to_value(Operator::Between).unwrap(),
            serde_json::json!("BETWEEN")
        );
    }
}
