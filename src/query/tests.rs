//! Tests for URL construction

use super::*;
use crate::catalog::Catalog;
use pretty_assertions::assert_eq;
use test_case::test_case;

const BASE: &str = "https://api.example.com/v1/transactions";

fn where_clause(url: &Url) -> String {
    url.query_pairs()
        .find(|(k, _)| k == "where")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

/// Split on " and " outside any parentheses
fn top_level_clauses(filter: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    let mut rest = filter;

    while !rest.is_empty() {
        if depth == 0 && rest.starts_with(" and ") {
            clauses.push(std::mem::take(&mut current));
            rest = &rest[5..];
            continue;
        }
        let ch = rest.chars().next().unwrap();
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    clauses.push(current);
    clauses
}

#[test]
fn test_filter_text() {
    let builder = QueryBuilder::new(BASE).unwrap();
    let query = QueryDefinition::new("q", 10, "ctxn_primary_qty > 0");
    assert_eq!(
        builder.filter(&query, &"1145".into()),
        "ctxn_warehouse_code ilike '1145' and (ctxn_transaction_date > current_date -182) \
         and (ctxn_primary_qty > 0)"
    );
}

#[test]
fn test_every_builtin_url_has_three_clauses() {
    let builder = QueryBuilder::new(BASE).unwrap();
    let warehouse = WarehouseCode::new("1290");

    for query in &Catalog::builtin() {
        let url = builder.build_url(query, &warehouse);
        let clauses = top_level_clauses(&where_clause(&url));

        assert_eq!(clauses.len(), 3, "{}", query.name);
        assert_eq!(clauses[0], "ctxn_warehouse_code ilike '1290'");
        assert_eq!(clauses[1], "(ctxn_transaction_date > current_date -182)");
        assert_eq!(clauses[2], format!("({})", query.predicate));
    }
}

#[test]
fn test_query_parameters() {
    let builder = QueryBuilder::new(BASE).unwrap();
    let query = QueryDefinition::new("q", 5000, "x = 1");
    let url = builder.build_url(&query, &"1145".into());

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0], ("orderby".into(), "ctxn_transaction_date desc".into()));
    assert_eq!(pairs[1], ("take".into(), "5000".into()));
    assert_eq!(pairs[2].0, "where");
    assert_eq!(url.path(), "/v1/transactions");
}

#[test]
fn test_encoding_is_single_pass() {
    let builder = QueryBuilder::new(BASE).unwrap();
    let query = QueryDefinition::new("q", 1, "ctxn_movement_type ilike '313%' and (ctxn_primary_qty <= 3)");
    let url = builder.build_url(&query, &"1145".into());
    let raw = url.query().unwrap();

    assert!(raw.contains("orderby=ctxn_transaction_date%20desc"));
    assert!(raw.contains("313%25"));
    assert!(raw.contains("%3C%3D"));
    assert!(!raw.contains(' '));
    assert!(!raw.contains('+'));
    assert!(!raw.contains("%2520"));
}

#[test_case("a+b" ; "literal plus")]
#[test_case("qty >= -3" ; "comparison")]
#[test_case("unit ilike 'PLT%' or x & y" ; "reserved characters")]
fn test_predicate_survives_encoding(predicate: &str) {
    let builder = QueryBuilder::new(BASE).unwrap();
    let query = QueryDefinition::new("q", 1, predicate);
    let url = builder.build_url(&query, &"W1".into());
    assert!(where_clause(&url).ends_with(&format!("({predicate})")));
}

#[test]
fn test_custom_lookback() {
    let builder = QueryBuilder::new(BASE).unwrap().with_lookback_days(30);
    let query = QueryDefinition::new("q", 1, "x = 1");
    let filter = builder.filter(&query, &"1145".into());
    assert!(filter.contains("current_date -30)"));
    assert_eq!(builder.lookback_days(), 30);
}

#[test]
fn test_existing_query_is_kept() {
    let builder = QueryBuilder::new("https://api.example.com/tx?tenant=acme").unwrap();
    let query = QueryDefinition::new("q", 1, "x = 1");
    let url = builder.build_url(&query, &"1145".into());

    let first = url.query_pairs().next().unwrap();
    assert_eq!(first.0, "tenant");
    assert_eq!(first.1, "acme");
    assert_eq!(url.query_pairs().count(), 4);
}

#[test]
fn test_invalid_base_url() {
    let err = QueryBuilder::new("not a url").unwrap_err();
    assert!(err.is_config());
}
