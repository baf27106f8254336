//! Infrastructure route tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let (status, _) = app.get("/v1/nope", None).await.unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
}
