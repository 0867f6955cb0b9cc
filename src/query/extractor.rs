//! # Predicate Extractor
//!
//! Scans free query text for suffix-tagged field tokens inside a
//! `filter: { ... }` clause and produces a flat list of predicates.
//!
//! Token shapes recognised inside the clause:
//! - `<field>__<suffix>: "<value>"` for every suffix in the operator table
//! - `<field>__between: { value: "<low>", highValue: "<high>" }`
//! - `<field>__in: [...]` and `<field>__not_in: [...]`
//!
//! The clause ends at the first `}` after `filter: {`. Braces are not
//! balanced, so a nested `{}` (as in `between`) truncates the clause at its
//! own closing brace and anything after it is not scanned. Callers rely on
//! this truncation point.

use std::sync::OnceLock;

use regex::Regex;

use super::operator::{Operator, BETWEEN_SUFFIX, OPERATOR_TABLE};
use super::predicate::{Condition, Predicate};

fn filter_clause_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"filter:\s*\{([^}]*)\}").expect("filter clause pattern"))
}

fn scalar_regexes() -> &'static [(Operator, Regex)] {
    static RES: OnceLock<Vec<(Operator, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        OPERATOR_TABLE
            .iter()
            .map(|(suffix, op)| {
                let pattern = format!(r#"(\w+)__{}:\s*"([^"]*)""#, suffix);
                (*op, Regex::new(&pattern).expect("scalar token pattern"))
            })
            .collect()
    })
}

fn between_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r#"(\w+)__{}:\s*\{{\s*value:\s*"([^"]*)"\s*,\s*highValue:\s*"([^"]*)""#,
            BETWEEN_SUFFIX
        );
        Regex::new(&pattern).expect("between token pattern")
    })
}

fn list_regexes() -> &'static [(Operator, Regex)] {
    static RES: OnceLock<Vec<(Operator, Regex)>> = OnceLock::new();
    RES.get_or_init(|| {
        [("in", Operator::In), ("not_in", Operator::NotIn)]
            .iter()
            .map(|(suffix, op)| {
                let pattern = format!(r#"(\w+)__{}:\s*\[([^\]]*)\]"#, suffix);
                (*op, Regex::new(&pattern).expect("list token pattern"))
            })
            .collect()
    })
}

/// Locate the body of the `filter: { ... }` clause (single-level brace scan)
pub fn filter_clause(raw: &str) -> Option<&str> {
    filter_clause_regex()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extract all predicates from raw query text.
///
/// Output order is scalar tokens (operator table order), then the
/// `between` token, then list tokens. Returns an empty list when the text
/// has no filter clause.
pub fn extract(raw: &str) -> Vec<Predicate> {
    let Some(clause) = filter_clause(raw) else {
        return Vec::new();
    };

    let mut predicates = Vec::new();

    for (op, re) in scalar_regexes() {
        for caps in re.captures_iter(clause) {
            let condition = Condition::from_scalar(*op, caps[2].to_string());
            if let Some(condition) = condition {
                predicates.push(Predicate::new(&caps[1], condition));
            }
        }
    }

    // Only the first between token is honoured.
    if let Some(caps) = between_regex().captures(clause) {
        predicates.push(Predicate::new(
            &caps[1],
            Condition::Between {
                low: caps[2].to_string(),
                high: caps[3].to_string(),
            },
        ));
    }

    for (op, re) in list_regexes() {
        for caps in re.captures_iter(clause) {
            if let Some(condition) = Condition::from_list(*op, split_list(&caps[2])) {
                predicates.push(Predicate::new(&caps[1], condition));
            }
        }
    }

    predicates
}

/// Split a bracketed list body. Blank elements are kept as empty strings.
fn split_list(body: &str) -> Vec<String> {
    body.split(',')
        .map(|item| item.trim().trim_matches('"').trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_clause() {
        assert!(extract("{ contacts { items { email } } }").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_single_eq() {
        let preds = extract(r#"{ contacts(filter: { email__eq: "a@b.com" }) { items } }"#);
        assert_eq!(
            preds,
            vec![Predicate::new("email", Condition::Eq("a@b.com".into()))]
        );
    }

    #[test]
    fn test_similar_suffixes_do_not_collide() {
        let preds = extract(
            r#"filter: { age__lte: "30", age__lt: "40", status__neq: "x", phone__not_null: "true" }"#,
        );
        let ops: Vec<_> = preds.iter().map(|p| p.operator()).collect();
        assert_eq!(
            ops,
            vec![
                Operator::Neq,
                Operator::Lt,
                Operator::Lte,
                Operator::NotHasProperty
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let preds = extract(r#"filter: { name__contains: "a", name__contains: "b" }"#);
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[1].condition, Condition::ContainsToken("b".into()));
    }

    #[test]
    fn test_between_first_only() {
        let preds = extract(
            r#"filter: { amount__between: { value: "5", highValue: "10", size__between: { value: "1", highValue: "2" }"#,
        );
        assert_eq!(preds.len(), 1);
        assert_eq!(
            preds[0],
            Predicate::new(
                "amount",
                Condition::Between {
                    low: "5".into(),
                    high: "10".into()
                }
            )
        );
    }

    #[test]
    fn test_clause_truncates_at_first_closing_brace() {
        let clause =
            filter_clause(r#"filter: { a__between: { value: "1", highValue: "2" }, b__eq: "x" }"#)
                .unwrap();
        assert!(!clause.contains("b__eq"));

        let preds = extract(r#"filter: { a__between: { value: "1", highValue: "2" }, b__eq: "x" }"#);
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].operator(), Operator::Between);
    }

    #[test]
    fn test_list_values_are_stripped() {
        let preds = extract(r#"filter: { tags__in: [ "a", "b" ,"c"] }"#);
        assert_eq!(
            preds,
            vec![Predicate::new(
                "tags",
                Condition::In(vec!["a".into(), "b".into(), "c".into()])
            )]
        );
    }

    #[test]
    fn test_blank_list_elements_preserved() {
        let preds = extract(r#"filter: { tags__not_in: ["a", , ""] }"#);
        assert_eq!(
            preds[0].condition,
            Condition::NotIn(vec!["a".into(), String::new(), String::new()])
        );
    }

    #[test]
    fn test_scalar_and_list_on_same_field() {
        let preds = extract(r#"filter: { tags__eq: "x", tags__in: ["y"] }"#);
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].operator(), Operator::Eq);
        assert_eq!(preds[1].operator(), Operator::In);
    }

    #[test]
    fn test_unterminated_quote_is_dropped() {
        assert!(extract(r#"filter: { email__eq: "broken }"#).is_empty());
    }

    #[test]
    fn test_unknown_suffix_ignored() {
        assert!(extract(r#"filter: { name__like: "x" }"#).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let q = r#"filter: { a__eq: "1", b__in: ["x"], c__between: { value: "1", highValue: "2" }"#;
        assert_eq!(extract(q), extract(q));
    }
}
