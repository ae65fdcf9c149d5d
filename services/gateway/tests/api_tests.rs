//! End-to-end handler tests over a temporary dataset directory

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dashboard_gateway::config::GatewayConfig;
use dashboard_gateway::router;
use dashboard_gateway::state::AppState;

/// Gateway over a dataset directory with exports and imports present
#[fixture]
fn app_with_data() -> (Router, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(
        dir.path().join("exports.json"),
        r#"[
            {"period": "2024Q1", "counterparty": "Kenya", "commodity": "Tea", "value": 100.0},
            {"period": "2024Q2", "counterparty": "Kenya", "commodity": "Tea", "value": 120.0},
            {"period": "2024Q2", "counterparty": "Uganda", "commodity": "Coffee", "value": 30.0},
            {"period": "2024Q2", "counterparty": "", "commodity": "Minerals", "value": "n/a"}
        ]"#,
    )
    .expect("write exports");
    std::fs::write(
        dir.path().join("imports.json"),
        r#"[
            {"period": "2024Q1", "counterparty": "China", "commodity": "Machinery", "value": 400.0},
            {"period": "2024Q2", "counterparty": "China", "commodity": "Machinery", "value": 500.0}
        ]"#,
    )
    .expect("write imports");

    let config = GatewayConfig {
        data_dir: dir.path().display().to_string(),
        ..GatewayConfig::default()
    };
    let state = AppState::new(config).expect("state");
    (router(state), dir)
}

/// Gateway over an empty dataset directory
#[fixture]
fn app_without_data() -> (Router, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let config = GatewayConfig {
        data_dir: dir.path().display().to_string(),
        ..GatewayConfig::default()
    };
    let state = AppState::new(config).expect("state");
    (router(state), dir)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    request_json(app, "GET", uri).await
}

async fn request_json(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[rstest]
#[tokio::test]
async fn test_health(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[tokio::test]
async fn test_quarterly_series(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/trade/exports/quarterly").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["available"], true);
    assert_eq!(data["flow"], "exports");

    let series = data["series"].as_array().expect("series");
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["period"], "2024Q1");
    assert_eq!(series[0]["value"], 100.0);
    assert_eq!(series[0]["growth_rate"], 0.0);
    assert_eq!(series[1]["period"], "2024Q2");
    // The "n/a" record contributes zero, so 2024Q2 sums to 150
    assert_eq!(series[1]["value"], 150.0);
    assert_eq!(series[1]["growth_rate"], 50.0);
    assert_eq!(series[1]["is_positive_growth"], true);
}

#[rstest]
#[tokio::test]
async fn test_quarterly_placeholder_when_missing(app_without_data: (Router, TempDir)) {
    let (app, _dir) = app_without_data;
    let (status, json) = get_json(app, "/api/trade/exports/quarterly").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["available"], false);
    assert_eq!(json["data"]["series"].as_array().expect("series").len(), 0);
}

#[rstest]
#[tokio::test]
async fn test_unknown_flow_is_invalid(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/trade/everything/quarterly").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["error"], "INVALID_FLOW");
}

#[rstest]
#[tokio::test]
async fn test_partner_ranking_with_limit(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/trade/exports/partners?limit=1").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["dimension"], "counterparty");
    let entries = data["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "Kenya");
    assert_eq!(entries[0]["total"], 220.0);
    // Kenya holds 220 of 250: share is computed before truncation
    assert_eq!(entries[0]["share_percentage"], 88.0);
}

#[rstest]
#[tokio::test]
async fn test_empty_counterparty_ranks_as_unknown(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (_, json) = get_json(app, "/api/trade/exports/partners").await;

    let entries = json["data"]["entries"].as_array().expect("entries");
    let keys: Vec<&str> = entries.iter().map(|e| e["key"].as_str().unwrap()).collect();
    assert!(keys.contains(&"Unknown"));
}

#[rstest]
#[tokio::test]
async fn test_overview(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/overview").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["available"], true);
    assert_eq!(data["period"], "2024Q2");
    assert_eq!(data["total_exports"]["value"], 150.0);
    assert_eq!(data["total_exports"]["growth_rate"], 50.0);
    assert_eq!(data["total_imports"]["value"], 500.0);
    assert_eq!(data["trade_balance"]["value"], -350.0);
    assert_eq!(data["trade_balance"]["status"], "deficit");
    assert_eq!(data["total_trade"]["value"], 650.0);
}

#[rstest]
#[tokio::test]
async fn test_overview_placeholder_shape(app_without_data: (Router, TempDir)) {
    let (app, _dir) = app_without_data;
    let (status, json) = get_json(app, "/api/overview").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["available"], false);
    // Absent data keeps the full payload shape with zeroed values
    assert_eq!(data["total_exports"]["value"], 0.0);
    assert_eq!(data["trade_balance"]["status"], "surplus");
    assert_eq!(data["total_trade"]["value"], 0.0);
}

#[rstest]
#[tokio::test]
async fn test_growth_analytics(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/analytics/growth").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["available"], true);
    assert_eq!(data["qoq"]["exports"].as_array().unwrap().len(), 2);
    assert_eq!(data["qoq"]["imports"].as_array().unwrap().len(), 2);
    // No quarter has a same-quarter predecessor a year earlier
    assert_eq!(data["yoy"]["exports"].as_array().unwrap().len(), 0);
    let insights = data["insights"].as_array().unwrap();
    assert!(
        insights
            .iter()
            .any(|i| i.as_str().unwrap().contains("Exports increased by 50.0%"))
    );
}

#[rstest]
#[tokio::test]
async fn test_concentration_analytics(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/analytics/concentration").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    // A single import source is a fully concentrated market
    assert_eq!(data["import_sources"]["index"], 1.0);
    assert_eq!(
        data["import_sources"]["interpretation"],
        "Highly concentrated market"
    );
    assert_eq!(data["import_sources"]["top_group"]["key"], "China");
    let export_index = data["export_destinations"]["index"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&export_index));
}

#[rstest]
#[tokio::test]
async fn test_balance_analytics(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = get_json(app, "/api/analytics/balance").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    let rows = data["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["period"], "2024Q1");
    assert_eq!(rows[0]["balance"], -300.0);
    assert_eq!(rows[0]["deficit"], true);
    assert_eq!(data["summary"]["quarters_in_deficit"], 2);
    assert_eq!(data["summary"]["deficit_percentage"], 100.0);
    assert_eq!(data["insights"].as_array().unwrap().len(), 3);
}

#[rstest]
#[tokio::test]
async fn test_narrative_placeholder_without_upstream(app_with_data: (Router, TempDir)) {
    let (app, _dir) = app_with_data;
    let (status, json) = request_json(app, "POST", "/api/narrative").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["available"], false);
    assert_eq!(json["data"]["narrative"], Value::Null);
}
