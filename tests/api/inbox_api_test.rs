// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};
use servcy::domain::models::inbox::NewInboxItem;
use servcy::domain::repositories::inbox_repository::InboxRepository;
use uuid::Uuid;

fn item(uid: &str, title: &str, category: &str, user_integration_id: Uuid) -> NewInboxItem {
    NewInboxItem {
        uid: uid.to_string(),
        title: title.to_string(),
        category: Some(category.to_string()),
        user_integration_id,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_inbox_flow() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let gmail = app.seed_user_integration(&alice, "Gmail", "alice@gmail.com").await;
    app.state
        .inbox
        .add_items(&[
            item("m1", "Invoice due", "message", gmail.id),
            item("m2", "Standup notes", "message", gmail.id),
            item("c1", "Build failed", "comment", gmail.id),
        ])
        .await
        .unwrap();
    let auth = app.bearer(&alice);

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "filters": { "category": "message" }, "pagination": { "page_size": 1 } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"]["details"]["total"], 2);
    assert_eq!(body["results"]["details"]["page_size"], 1);
    assert_eq!(body["results"]["items"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "search": "Invoice" }))
        .await;
    let body: Value = response.json();
    let items = body["results"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    let invoice_id = items[0]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .get("/inbox/unread-count")
        .add_header("Authorization", auth.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"]["unread_count"], 3);

    let response = app
        .server
        .post("/inbox/read")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "item_id": invoice_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .post("/inbox/archive")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "item_ids": [invoice_id] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "filters": { "is_archived": true } }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"]["details"]["total"], 1);
    assert_eq!(body["results"]["items"][0]["is_read"], true);

    let response = app
        .server
        .get("/inbox/unread-count")
        .add_header("Authorization", auth)
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"]["unread_count"], 2);
}

#[tokio::test]
async fn test_inbox_rejects_empty_selection() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let auth = app.bearer(&alice);

    for path in ["/inbox/archive", "/inbox/delete"] {
        let response = app
            .server
            .post(path)
            .add_header("Authorization", auth.clone())
            .json(&json!({ "item_ids": [] }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", path);
    }

    let response = app
        .server
        .post("/inbox/read")
        .add_header("Authorization", auth)
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["detail"], "No item to read");
}

#[tokio::test]
async fn test_inbox_status_update_is_scoped_to_owner() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let bob = app.seed_user("bob@servcy.com").await;
    let gmail = app.seed_user_integration(&alice, "Gmail", "alice@gmail.com").await;
    let (created, _) = app
        .state
        .inbox
        .add_item(&item("m1", "Invoice due", "message", gmail.id))
        .await
        .unwrap();
    let path = format!("/inbox/{}/status", created.id);

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", app.bearer(&bob))
        .json(&json!({ "status": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", app.bearer(&alice))
        .json(&json!({ "status": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"]["status"], 1);

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", app.bearer(&alice))
        .json(&json!({ "status": "accepted" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_inbox_fetch_filters_by_status_code_and_source() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let gmail = app.seed_user_integration(&alice, "Gmail", "alice@gmail.com").await;
    let slack = app.seed_user_integration(&alice, "Slack", "T0123").await;
    app.state
        .inbox
        .add_items(&[
            item("m1", "Invoice due", "message", gmail.id),
            item("m2", "Standup notes", "message", gmail.id),
            item("s1", "Deploy done", "message", slack.id),
        ])
        .await
        .unwrap();
    let (snoozed, _) = app
        .state
        .inbox
        .add_item(&item("s2", "Lunch?", "message", slack.id))
        .await
        .unwrap();
    let auth = app.bearer(&alice);

    app.server
        .patch(&format!("/inbox/{}/status", snoozed.id))
        .add_header("Authorization", auth.clone())
        .json(&json!({ "status": 0, "snoozed_till": "2030-01-01T00:00:00Z" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "filters": { "source": "Gmail" } }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"]["details"]["total"], 2);
    let items = body["results"]["items"].as_array().unwrap();
    assert!(items.iter().all(|i| i["status"] == -2));

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth.clone())
        .json(&json!({ "filters": { "source": "Slack", "status": 0 } }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"]["details"]["total"], 1);
    assert_eq!(body["results"]["items"][0]["uid"], "s2");
    assert_eq!(body["results"]["items"][0]["status"], 0);

    let response = app
        .server
        .post("/inbox/fetch")
        .add_header("Authorization", auth)
        .json(&json!({ "filters": { "status": 9 } }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}
