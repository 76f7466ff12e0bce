//! Integration tests for llmc-lb API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Facets (filter-control domains)
//! - Unfiltered leaderboard
//! - Filtered leaderboard with defaults, narrowing and invalid input

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use llmc_common::{CanonicalTable, ModelRecord};
use llmc_lb::{build_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

fn record(name: &str, score: f64, open_weight: bool) -> ModelRecord {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1);
    ModelRecord {
        model_name: name.to_string(),
        score: Some(score),
        latency: Some(1.04),
        parameters: open_weight.then_some(8.0),
        dummy_parameters: 8.0,
        release_date: date,
        open_weight,
        languages: Some("English, German".to_string()),
        context_size: 128,
        license_name: if open_weight { "MIT License" } else { "Proprietary" }.to_string(),
        license_url: "https://example.com/license".to_string(),
        single_image: !open_weight,
        multiple_images: false,
        audio: false,
        video: false,
        input_price: if open_weight { 0.0 } else { 2.5 },
        output_price: if open_weight { 0.0 } else { 10.0 },
        license: "[MIT License](https://example.com/license)".to_string(),
        temp_date: date,
    }
}

/// Test helper: app over a two-row table
fn setup_app() -> axum::Router {
    let table = CanonicalTable::from_records(vec![
        record("open-8b", 40.0, true),
        record("api-model", 70.0, false),
    ]);
    build_router(AppState::new(table))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn model_names(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Model Name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = setup_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "llmc-lb");
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
    assert_eq!(body["rows"], 2);
}

#[tokio::test]
async fn test_health_reports_empty_table() {
    let app = build_router(AppState::new(CanonicalTable::from_records(Vec::new())));
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rows"], 0);
}

// =============================================================================
// Facets Tests
// =============================================================================

#[tokio::test]
async fn test_facets_endpoint() {
    let response = setup_app().oneshot(get("/api/facets")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["languages"], json!(["English", "German"]));
    assert_eq!(body["licenses"], json!(["MIT License", "Proprietary"]));
    assert_eq!(body["max_output_price"], 10.0);
    assert_eq!(body["model_kinds"], json!(["Open-Weight", "Commercial"]));
    assert_eq!(body["months"][0], "January");
}

// =============================================================================
// Leaderboard Tests
// =============================================================================

#[tokio::test]
async fn test_leaderboard_unfiltered_sorted_by_score() {
    let response = setup_app().oneshot(get("/api/leaderboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_rows"], 2);
    assert_eq!(body["columns"].as_array().unwrap().len(), 9);
    assert_eq!(model_names(&body), vec!["api-model", "open-8b"]);
    // display rounding
    assert_eq!(body["rows"][0]["Latency (s)"], 1.0);
}

#[tokio::test]
async fn test_filter_with_empty_body_uses_defaults() {
    let response = setup_app()
        .oneshot(post_json("/api/leaderboard/filter", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_rows"], 2);
}

#[tokio::test]
async fn test_filter_open_weight_only() {
    let response = setup_app()
        .oneshot(post_json(
            "/api/leaderboard/filter",
            json!({"model_kinds": ["Open-Weight"]}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(model_names(&body), vec!["open-8b"]);
}

#[tokio::test]
async fn test_filter_no_model_kind_is_empty() {
    let response = setup_app()
        .oneshot(post_json("/api/leaderboard/filter", json!({"model_kinds": []})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_rows"], 0);
    assert_eq!(body["columns"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_filter_modality_and_price() {
    let response = setup_app()
        .oneshot(post_json(
            "/api/leaderboard/filter",
            json!({"modalities": ["Single Image"], "input_price": [1.0, 3.0]}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(model_names(&body), vec!["api-model"]);
}

#[tokio::test]
async fn test_filter_malformed_date_is_ignored() {
    let response = setup_app()
        .oneshot(post_json(
            "/api/leaderboard/filter",
            json!({"start_year": "not-a-year", "end_year": "2021"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_rows"], 2);
}

#[tokio::test]
async fn test_filter_unknown_modality_rejected() {
    let response = setup_app()
        .oneshot(post_json(
            "/api/leaderboard/filter",
            json!({"modalities": ["Smell"]}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
