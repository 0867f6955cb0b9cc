//! Query Translation Tests
//!
//! Text-path behavior end to end:
//! - suffix tokens become predicates with the right value shape
//! - missing filter clause yields no groups
//! - only the first `between` is honored
//! - list elements are unquoted and trimmed
//! - `limit:` is clamped from above only
//! - response remapping charges the fixed cost model

use std::collections::BTreeMap;

use crmgate::crm::{Item, SearchResponse};
use crmgate::query::translator::remap;
use crmgate::query::{
    assemble, extract, extract_pagination, translate, Collection, Condition, CostAccountant,
    Operator, Predicate, RequestKind,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn item(id: &str, props: &[(&str, Value)]) -> Item {
    Item {
        id: id.to_string(),
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn props(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

// =============================================================================
// Extraction Tests
// =============================================================================

#[test]
fn test_eq_token_yields_single_predicate() {
    for (field, value) in [("email", "a@b.com"), ("firstname", "Ada"), ("zip", "")] {
        let text = format!(r#"{{ contacts(filter: {{ {}__eq: "{}" }}) {{ items {{ id }} }} }}"#, field, value);
        let predicates = extract(&text);
        assert_eq!(predicates, vec![Predicate::new(field, Condition::Eq(value.to_string()))]);
    }
}

#[test]
fn test_no_filter_clause_means_no_groups() {
    let text = "{ contacts(limit: 5) { items { id email } } }";
    let predicates = extract(text);
    assert!(predicates.is_empty());

    let request = assemble(predicates, props(&["email"]), extract_pagination(text));
    assert!(request.filter_groups.is_empty());
    assert_eq!(request.limit, 5);
}

#[test]
fn test_between_wire_shape() {
    let predicates = extract(r#"filter: { amount__between: { value: "5", highValue: "10" } }"#);
    assert_eq!(predicates.len(), 1);

    let wire = serde_json::to_value(&predicates[0]).unwrap();
    assert_eq!(
        wire,
        json!({"propertyName": "amount", "operator": "BETWEEN", "value": "5", "highValue": "10"})
    );
}

#[test]
fn test_at_most_one_between() {
    let text = r#"filter: { amount__between: { value: "5", highValue: "10" , price__between: { value: "1", highValue: "2" } }"#;
    let betweens = extract(text)
        .into_iter()
        .filter(|p| p.operator() == Operator::Between)
        .count();
    assert_eq!(betweens, 1);
}

#[test]
fn test_in_list_is_unquoted() {
    let predicates = extract(r#"filter: { tags__in: ["a", "b" ,  "c"] }"#);
    assert_eq!(
        predicates,
        vec![Predicate::new(
            "tags",
            Condition::In(vec!["a".into(), "b".into(), "c".into()])
        )]
    );

    let wire = serde_json::to_value(&predicates[0]).unwrap();
    assert_eq!(wire["operator"], "IN");
    assert_eq!(wire["values"], json!(["a", "b", "c"]));
}

#[test]
fn test_scalar_and_list_on_same_text_both_fire() {
    let predicates = extract(r#"filter: { age__eq: "30", tags__in: ["x"] }"#);
    let ops: Vec<Operator> = predicates.iter().map(Predicate::operator).collect();
    assert_eq!(ops, vec![Operator::Eq, Operator::In]);
}

#[test]
fn test_extraction_is_deterministic() {
    let text = r#"filter: { a__gt: "1", b__lt: "9", c__not_in: ["p","q"], d__null: "" }"#;
    let first = extract(text);
    for _ in 0..50 {
        assert_eq!(extract(text), first);
    }
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[test]
fn test_limit_clamped_from_above() {
    let big = translate("{ deals(limit: 500) { items { dealname } } }").unwrap();
    assert_eq!(big.request.limit, 200);

    let ok = translate("{ deals(limit: 50) { items { dealname } } }").unwrap();
    assert_eq!(ok.request.limit, 50);
}

#[test]
fn test_limit_not_clamped_from_below() {
    assert_eq!(extract_pagination("limit: 0").limit, 0);
    assert_eq!(extract_pagination("limit: -3").limit, -3);
}

#[test]
fn test_offset_becomes_cursor() {
    let translated = translate("{ tickets(limit: 20, offset: 40) { items { subject } } }").unwrap();
    assert_eq!(translated.request.after.as_deref(), Some("40"));
    assert_eq!(translated.collection, Collection::Tickets);
}

// =============================================================================
// Translation Tests
// =============================================================================

#[test]
fn test_selection_drives_properties() {
    let translated =
        translate("{ companies { items { id name domain } } }").unwrap();
    assert_eq!(translated.request.properties, props(&["name", "domain"]));
}

#[test]
fn test_defaults_when_selection_empty() {
    let translated = translate("{ companies { items { id } } }").unwrap();
    assert!(!translated.request.properties.is_empty());
    assert_eq!(translated.request.limit, 10);
}

#[test]
fn test_text_path_single_group() {
    let translated = translate(
        r#"{ contacts(filter: { email__contains: "acme", lifecyclestage__eq: "lead", age__gte: "21" }) { items { email } } }"#,
    )
    .unwrap();
    assert_eq!(translated.request.filter_groups.len(), 1);
    assert_eq!(translated.request.total_filters(), 3);
}

// =============================================================================
// Cost Tests
// =============================================================================

#[test]
fn test_cost_two_objects_three_properties() {
    let budget = CostAccountant::account(RequestKind::CollectionSearch, 2, 3, &[2, 2]);
    assert_eq!(budget.used, 374);
    assert_eq!(budget.max, 30_000);
}

#[test]
fn test_remap_matches_cost_model() {
    let response = SearchResponse {
        total: Some(2),
        results: vec![
            item("1", &[("email", json!("a@x.io")), ("firstname", json!("A")), ("lastname", json!(""))]),
            item("2", &[("email", json!("b@x.io")), ("lastname", json!("B"))]),
        ],
        paging: None,
    };

    let (items, budget) = remap(&response, &props(&["email", "firstname", "lastname"]));
    assert_eq!(budget.used, 374);
    assert_eq!(items[1]["firstname"], Value::Null);
    assert_eq!(items[0]["id"], "1");
}

#[test]
fn test_cost_overrun_is_reported_not_rejected() {
    let counts = vec![100; 200];
    let budget = CostAccountant::account(RequestKind::CollectionSearch, 200, 100, &counts);
    assert!(budget.exceeded());
}
