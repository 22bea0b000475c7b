//! Router-level tests with an injected configuration source.
//!
//! No live database is needed: the root route never touches a backend, and
//! a missing configuration must fail before any network call.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use products_api::create_router;
use products_api::state::AppState;
use tower::ServiceExt;

fn app_with(env: HashMap<String, String>) -> Router {
    create_router(AppState::new(Arc::new(env)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_reports_status_and_endpoints() {
    let (status, body) = get(app_with(HashMap::new()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"status": "ok", "endpoints": ["/products"]})
    );
}

#[tokio::test]
async fn products_without_config_fails_before_any_network_call() {
    let (status, body) = get(app_with(HashMap::new()), "/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");

    let message = body["error"]["message"].as_str().unwrap();
    for key in [
        "AZURE_SQL_SERVER",
        "AZURE_SQL_DATABASE",
        "AZURE_SQL_USERNAME",
        "AZURE_SQL_PASSWORD",
    ] {
        assert!(message.contains(key), "missing {key} in: {message}");
    }
}

#[tokio::test]
async fn products_with_partial_config_names_only_missing_keys() {
    let env: HashMap<String, String> = [
        ("AZURE_SQL_SERVER", "sql-demo.database.windows.net"),
        ("AZURE_SQL_DATABASE", "salesdb"),
        ("AZURE_SQL_USERNAME", "sqladmin"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let (status, body) = get(app_with(env), "/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("AZURE_SQL_PASSWORD"));
    assert!(!message.contains("AZURE_SQL_SERVER"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app_with(HashMap::new())
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = get(app_with(HashMap::new()), "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products"].is_object());
}
