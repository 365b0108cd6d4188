// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
    let request_id = response.header("x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = create_test_app().await;

    let response = app.server.get("/inbox/unread-count").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert!(body["detail"].is_string());
}
