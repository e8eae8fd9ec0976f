//! Tests for engine module

use super::*;
use crate::catalog::QueryDefinition;
use crate::error::Error;
use crate::http::{HttpClientConfig, TokenAuth};
use crate::types::{DATA_SOURCE_COLUMN, WAREHOUSE_CODE_COLUMN};
use serde_json::json;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_catalog() -> Catalog {
    Catalog::new(vec![
        QueryDefinition::new("alpha", 100, "ctxn_movement_type ilike '313%'"),
        QueryDefinition::new("beta", 100, "ctxn_movement_type ilike '261%'"),
    ])
    .unwrap()
}

fn fetcher(retries: u32) -> Fetcher {
    Fetcher::with_config(
        HttpClientConfig::builder()
            .max_retries(retries)
            .retry_delay(Duration::from_millis(10))
            .timeout(Duration::from_secs(5))
            .auth(TokenAuth::new("secret"))
            .build(),
    )
    .unwrap()
}

fn extractor(server: &MockServer, out: &std::path::Path) -> Extractor {
    let builder = QueryBuilder::new(&format!("{}/transactions", server.uri())).unwrap();
    Extractor::new(fetcher(2), builder, test_catalog(), Persister::new(out))
        .with_pacing(Pacing::none())
}

fn rows_json(prefix: &str, n: usize) -> serde_json::Value {
    json!((0..n)
        .map(|i| json!({"ctxn_id": format!("{prefix}{i}"), "ctxn_primary_qty": i}))
        .collect::<Vec<_>>())
}

async fn mount_query(
    server: &MockServer,
    builder: &QueryBuilder,
    query: &QueryDefinition,
    warehouse: &WarehouseCode,
    body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("where", builder.filter(query, warehouse)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_fallback_empty(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

// ============================================================================
// Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_tags_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ctxn_id": 1, "item": {"sku": "A"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let url = url::Url::parse(&server.uri()).unwrap();
    let wh = WarehouseCode::new("1145");
    let outcome = fetcher(2).fetch(&url, "alpha", &wh).await;

    let FetchOutcome::Records(set) = outcome else {
        panic!("expected rows");
    };
    assert_eq!(set.len(), 1);
    let row = &set.rows()[0];
    assert_eq!(row["item.sku"], "A");
    assert_eq!(row[DATA_SOURCE_COLUMN], "alpha");
    assert_eq!(row[WAREHOUSE_CODE_COLUMN], "1145");
}

#[tokio::test]
async fn test_fetch_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let url = url::Url::parse(&server.uri()).unwrap();
    let outcome = fetcher(2).fetch(&url, "alpha", &WarehouseCode::new("1")).await;
    assert_eq!(outcome, FetchOutcome::Empty);
}

#[tokio::test]
async fn test_fetch_exhausted_retries_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let url = url::Url::parse(&server.uri()).unwrap();
    let outcome = fetcher(2).fetch(&url, "alpha", &WarehouseCode::new("1")).await;
    assert!(outcome.is_failed());
    assert!(outcome.into_records().is_empty());
}

#[tokio::test]
async fn test_fetch_undecodable_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
        .expect(1)
        .mount(&server)
        .await;

    let url = url::Url::parse(&server.uri()).unwrap();
    let outcome = fetcher(2).fetch(&url, "alpha", &WarehouseCode::new("1")).await;
    assert!(outcome.is_failed());
}

// ============================================================================
// Stats Tests
// ============================================================================

#[test]
fn test_query_stats_record() {
    let mut stats = QueryStats::default();
    stats.record(&FetchOutcome::Empty);
    stats.record(&FetchOutcome::Failed {
        reason: "x".to_string(),
    });
    stats.record(&FetchOutcome::Empty);

    assert_eq!(stats.empty, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.with_rows, 0);
    assert_eq!(stats.total(), 3);
}

#[test]
fn test_run_summary_counts() {
    let ok = WarehouseOutcome {
        warehouse: WarehouseCode::new("1"),
        rows: 4,
        queries: QueryStats::default(),
        path: Some("data/transactions_1.parquet".into()),
        failure: None,
    };
    let failed = WarehouseOutcome {
        warehouse: WarehouseCode::new("2"),
        rows: 0,
        queries: QueryStats::default(),
        path: None,
        failure: Some("no data obtained".to_string()),
    };
    let summary = RunSummary {
        warehouses: vec![ok, failed],
    };

    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.total_rows(), 4);
}

// ============================================================================
// Processor Tests
// ============================================================================

#[tokio::test]
async fn test_process_warehouse_all_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());
    let dataset = extractor.process_warehouse(&WarehouseCode::new("1145")).await;

    assert!(dataset.is_empty());
}

#[tokio::test]
async fn test_process_warehouse_concatenates_in_catalog_order() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());
    let builder = extractor.builder.clone();
    let wh = WarehouseCode::new("1145");

    let catalog = test_catalog();
    mount_query(&server, &builder, &catalog.definitions()[0], &wh, rows_json("a", 10)).await;
    mount_query(&server, &builder, &catalog.definitions()[1], &wh, rows_json("b", 5)).await;

    let dataset = extractor.process_warehouse(&wh).await;
    assert_eq!(dataset.len(), 15);

    let sources: Vec<&str> = dataset
        .rows()
        .iter()
        .map(|r| r[DATA_SOURCE_COLUMN].as_str().unwrap())
        .collect();
    assert!(sources[..10].iter().all(|s| *s == "alpha"));
    assert!(sources[10..].iter().all(|s| *s == "beta"));
    assert_eq!(dataset.rows()[0]["ctxn_id"], "a0");
    assert_eq!(dataset.rows()[10]["ctxn_id"], "b0");
}

#[tokio::test]
async fn test_process_warehouse_failed_query_contributes_nothing() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());
    let builder = extractor.builder.clone();
    let wh = WarehouseCode::new("1290");
    let catalog = test_catalog();

    Mock::given(method("GET"))
        .and(query_param("where", builder.filter(&catalog.definitions()[0], &wh)))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;
    mount_query(&server, &builder, &catalog.definitions()[1], &wh, rows_json("b", 2)).await;

    let (dataset, stats) = extractor.collect(&wh).await;
    assert_eq!(dataset.len(), 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.with_rows, 1);
}

// ============================================================================
// Run Tests
// ============================================================================

#[tokio::test]
async fn test_run_all_warehouses_empty_is_fatal() {
    let server = MockServer::start().await;
    mount_fallback_empty(&server).await;

    let dir = tempdir().unwrap();
    let out = dir.path().join("data");
    let extractor = extractor(&server, &out);
    let warehouses = WarehouseCode::parse_list("1145,1290");

    let err = extractor.run(&warehouses).await.unwrap_err();
    assert!(matches!(err, Error::AllWarehousesFailed { attempted: 2 }));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_run_one_warehouse_succeeding_is_enough() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());
    let builder = extractor.builder.clone();
    let wh = WarehouseCode::new("1290");

    mount_query(&server, &builder, &test_catalog().definitions()[1], &wh, rows_json("b", 3)).await;
    mount_fallback_empty(&server).await;

    let warehouses = WarehouseCode::parse_list("1145,1290");
    let summary = extractor.run(&warehouses).await.unwrap();

    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.total_rows(), 3);
    assert_eq!(summary.warehouses[0].warehouse.as_str(), "1145");
    assert!(summary.warehouses[0].path.is_none());
    assert!(dir.path().join("transactions_1290.parquet").exists());
    assert!(!dir.path().join("transactions_1145.parquet").exists());
}

#[tokio::test]
async fn test_run_empty_warehouse_list_is_fatal() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());

    let err = extractor.run(&[]).await.unwrap_err();
    assert!(matches!(err, Error::AllWarehousesFailed { attempted: 0 }));
}

#[tokio::test]
async fn test_extract_all_reports_failures_without_erroring() {
    let server = MockServer::start().await;
    mount_fallback_empty(&server).await;

    let dir = tempdir().unwrap();
    let extractor = extractor(&server, dir.path());
    let warehouses = WarehouseCode::parse_list("1145,1290");

    let summary = extractor.extract_all(&warehouses).await;
    assert_eq!(summary.warehouses.len(), 2);
    assert_eq!(summary.succeeded(), 0);
    for outcome in &summary.warehouses {
        assert_eq!(outcome.failure.as_deref(), Some("no data obtained"));
        assert_eq!(outcome.queries.empty, 2);
    }

    let err = summary.into_result().unwrap_err();
    assert!(matches!(err, Error::AllWarehousesFailed { attempted: 2 }));
}

#[test]
fn test_summary_into_result_keeps_partial_success() {
    let summary = RunSummary {
        warehouses: vec![WarehouseOutcome {
            warehouse: WarehouseCode::new("1"),
            rows: 1,
            queries: QueryStats::default(),
            path: Some("data/transactions_1.parquet".into()),
            failure: None,
        }],
    };
    assert_eq!(summary.clone().into_result().unwrap(), summary);
}
