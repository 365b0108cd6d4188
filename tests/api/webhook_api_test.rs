// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};
use servcy::domain::models::inbox::InboxQuery;
use servcy::domain::models::integration::OUTLOOK;
use servcy::domain::repositories::inbox_repository::InboxRepository;

fn mail_notification(account_id: &str, message_id: &str) -> String {
    json!({
        "value": [{
            "clientState": account_id,
            "resourceData": {
                "id": message_id,
                "subject": "Quarterly report",
                "bodyPreview": "Please find attached",
                "from": { "emailAddress": { "address": "boss@servcy.com" } }
            }
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_asana_handshake_echoes_secret() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/webhooks/asana/42")
        .add_header("X-Hook-Secret", "handshake-secret")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("x-hook-secret"), "handshake-secret");
}

#[tokio::test]
async fn test_asana_events() {
    let app = create_test_app().await;
    let events = json!({
        "events": [{
            "action": "changed",
            "resource": { "gid": "1200", "resource_type": "task" },
            "change": { "field": "due_on", "action": "changed" }
        }]
    });

    let response = app
        .server
        .post("/webhooks/asana/42")
        .add_header("X-Hook-Signature", "sig")
        .text(events.to_string())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app
        .server
        .post("/webhooks/asana/42")
        .add_header("X-Hook-Signature", "sig")
        .text("{not json")
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.server.post("/webhooks/asana/42").text("{}").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_microsoft_validation_token_is_echoed() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/webhooks/microsoft")
        .add_query_param("validationToken", "Validation: abc 123")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Validation: abc 123");
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_microsoft_notification_for_unknown_account() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/webhooks/microsoft")
        .text(mail_notification("nobody@outlook.com", "AAMk1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "No integration found for email.");
}

#[tokio::test]
async fn test_microsoft_notification_creates_inbox_item_once() {
    let app = create_test_app().await;
    let user = app.seed_user("mailbox@servcy.com").await;
    let user_integration = app
        .seed_user_integration(&user, OUTLOOK, "me@outlook.com")
        .await;

    for _ in 0..2 {
        let response = app
            .server
            .post("/webhooks/microsoft")
            .text(mail_notification("me@outlook.com", "AAMk1"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let page = app
        .state
        .inbox
        .list(user_integration.user_id, &InboxQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].uid, "AAMk1");
    assert_eq!(page.items[0].title, "Quarterly report");
    assert_eq!(page.items[0].category.as_deref(), Some("message"));
}

#[tokio::test]
async fn test_malformed_microsoft_notification_is_acknowledged() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/webhooks/microsoft")
        .text(json!({ "value": [] }).to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_logging_webhooks_acknowledge() {
    let app = create_test_app().await;

    for path in [
        "/webhooks/figma",
        "/webhooks/github",
        "/webhooks/slack",
        "/webhooks/google",
        "/webhooks/jira",
        "/webhooks/trello/7",
    ] {
        let response = app.server.post(path).text("{}").await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", path);
    }
}
