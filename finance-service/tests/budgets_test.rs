mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn create_then_list_budget_with_default_period() {
    let app = TestApp::spawn();

    let (status, created) = app
        .post_json("/api/budgets", json!({ "category": "Groceries", "limit": 300 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["ok"], json!(true));
    assert!(!created["id"].as_str().unwrap().is_empty());

    let (status, body) = app.get("/api/budgets").await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["_id"], created["id"]);
    assert_eq!(items[0]["category"], json!("Groceries"));
    assert_eq!(items[0]["limit"].as_f64(), Some(300.0));
    assert_eq!(items[0]["period"], json!("monthly"));
}

#[tokio::test]
async fn explicit_period_and_start_date_are_kept() {
    let app = TestApp::spawn();

    let (status, _) = app
        .post_json(
            "/api/budgets",
            json!({
                "category": "Travel",
                "limit": 2000.5,
                "period": "annual",
                "start_date": "2024-01-01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/budgets").await;
    let item = &body["items"][0];
    assert_eq!(item["period"], json!("annual"));
    assert_eq!(item["start_date"], json!("2024-01-01"));
}

#[tokio::test]
async fn zero_limit_is_accepted() {
    let app = TestApp::spawn();

    let (status, _) = app
        .post_json("/api/budgets", json!({ "category": "Fun", "limit": 0 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stored("budget"), 1);
}

#[tokio::test]
async fn negative_limit_is_rejected() {
    let app = TestApp::spawn();

    let (status, body) = app
        .post_json("/api/budgets", json!({ "category": "Fun", "limit": -5 }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!("Validation error"));
    assert!(body["details"].as_str().unwrap().contains("limit"));
    assert_eq!(app.stored("budget"), 0);
}

#[tokio::test]
async fn missing_limit_is_rejected() {
    let app = TestApp::spawn();

    let (status, _) = app
        .post_json("/api/budgets", json!({ "category": "Fun" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn budget_list_respects_limit_and_default() {
    let app = TestApp::spawn();

    for i in 0..60 {
        let (status, _) = app
            .post_json(
                "/api/budgets",
                json!({ "category": format!("Category {}", i), "limit": 10 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app.get("/api/budgets").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 50);

    let (_, body) = app.get("/api/budgets?limit=7").await;
    assert_eq!(body["items"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn budget_transport_has_no_raw_store_types() {
    let app = TestApp::spawn();

    app.post_json("/api/budgets", json!({ "category": "Rent", "limit": 1200 }))
        .await;

    let (_, body) = app.get("/api/budgets").await;
    let item = body["items"][0].as_object().unwrap();

    for (key, value) in item {
        assert!(
            !value.is_object(),
            "field `{}` leaked an extended JSON object: {}",
            key,
            value
        );
    }
    assert!(item["created_at"].is_string());
}

#[tokio::test]
async fn body_without_json_content_type_is_rejected() {
    let app = TestApp::spawn();

    let (status, body) = app
        .post_untyped(
            "/api/budgets",
            json!({ "category": "Groceries", "limit": 300 }).to_string(),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(app.stored("budget"), 0);
}

#[tokio::test]
async fn truncated_json_body_is_rejected() {
    let app = TestApp::spawn();

    let (status, _) = app
        .post_raw("/api/budgets", "{\"category\": ".to_string())
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.stored("budget"), 0);
}
