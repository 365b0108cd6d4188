// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_document_lifecycle() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let auth = app.bearer(&alice);

    let response = app
        .server
        .post("/documents")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "name": "Roadmap", "link": "https://servcy.com/roadmap" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["results"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["results"]["meta_data"], json!({}));

    let response = app
        .server
        .get("/documents")
        .add_query_param("search", "Road")
        .add_header("Authorization", auth.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .delete(&format!("/documents/{}", id))
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/documents")
        .add_header("Authorization", auth.clone())
        .await;
    let body: Value = response.json();
    assert!(body["results"].as_array().unwrap().is_empty());

    let response = app
        .server
        .post(&format!("/documents/{}/restore", id))
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get(&format!("/documents/{}", id))
        .add_header("Authorization", auth)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"]["name"], "Roadmap");
}

#[tokio::test]
async fn test_document_validation_and_membership() {
    let app = create_test_app().await;
    let owner = app.seed_user("owner@servcy.com").await;
    let outsider = app.seed_user("outsider@servcy.com").await;
    let workspace = app.seed_workspace("acme", &owner).await;

    let response = app
        .server
        .post("/documents")
        .add_header("Authorization", app.bearer(&owner))
        .json(&json!({ "name": "", "link": "not a url" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/documents")
        .add_header("Authorization", app.bearer(&outsider))
        .json(&json!({ "name": "Plan", "workspace_id": workspace.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/documents")
        .add_header("Authorization", app.bearer(&owner))
        .json(&json!({ "name": "Plan", "workspace_id": workspace.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}
