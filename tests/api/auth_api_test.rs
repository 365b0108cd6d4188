// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_logout_blacklists_refresh_token() {
    let app = create_test_app().await;
    let user = app.seed_user("alice@servcy.com").await;
    let pair = app.state.tokens.issue_pair(user.id).unwrap();

    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": pair.refresh }))
        .await;
    assert_eq!(response.status_code(), StatusCode::RESET_CONTENT);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Success!");

    let response = app
        .server
        .post("/logout")
        .json(&json!({ "refresh": pair.refresh }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["detail"], "An error occurred while logging out!");
}

#[tokio::test]
async fn test_logout_rejects_bad_input() {
    let app = create_test_app().await;
    let user = app.seed_user("alice@servcy.com").await;

    for body in [
        json!({ "refresh": "not-a-token" }),
        json!({ "refresh": app.access_token(&user) }),
        json!({}),
    ] {
        let response = app.server.post("/logout").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = create_test_app().await;
    let user = app.seed_user("alice@servcy.com").await;
    let pair = app.state.tokens.issue_pair(user.id).unwrap();

    let response = app
        .server
        .post("/token/refresh")
        .json(&json!({ "refresh": pair.refresh }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let rotated = body["refresh"].as_str().unwrap().to_string();
    assert_ne!(rotated, pair.refresh);
    assert!(body["access"].is_string());

    let response = app
        .server
        .post("/token/refresh")
        .json(&json!({ "refresh": pair.refresh }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/users/me/notification-preferences")
        .add_header("Authorization", format!("Bearer {}", body["access"].as_str().unwrap()))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
