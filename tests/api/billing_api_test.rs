// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, create_test_app_with, test_settings, TestApp, PADDLE_SECRET, PLUS_PRICE_ID,
};
use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestResponse;
use chrono::Utc;
use serde_json::{json, Value};
use servcy::domain::services::billing_service::sign_paddle_payload;
use uuid::Uuid;

async fn post_paddle(app: &TestApp, event: &Value) -> TestResponse {
    let body = event.to_string().into_bytes();
    let signature = sign_paddle_payload(PADDLE_SECRET, Utc::now().timestamp(), &body);
    app.server
        .post("/webhooks/paddle")
        .add_header("Paddle-Signature", signature)
        .bytes(Bytes::from(body))
        .await
}

fn subscription_event(event_id: &str, event_type: &str, workspace_id: Uuid) -> Value {
    json!({
        "event_id": event_id,
        "event_type": event_type,
        "data": {
            "id": "sub_01",
            "customer_id": "ctm_01",
            "items": [{ "price": { "id": PLUS_PRICE_ID } }],
            "custom_data": { "workspace_id": workspace_id.to_string() }
        }
    })
}

#[tokio::test]
async fn test_paddle_rejects_bad_signature() {
    let app = create_test_app().await;
    let body = json!({ "event_id": "evt_01" }).to_string();

    let response = app
        .server
        .post("/webhooks/paddle")
        .add_header("Paddle-Signature", "ts=1;h1=deadbeef")
        .text(body.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app.server.post("/webhooks/paddle").text(body).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_paddle_rejects_events_without_configured_secret() {
    let mut settings = test_settings();
    settings.paddle.webhook_secret = String::new();
    let app = create_test_app_with(settings).await;
    let owner = app.seed_user("owner@servcy.com").await;
    let workspace = app.seed_workspace("acme", &owner).await;

    let body = subscription_event("evt_01", "subscription.created", workspace.id)
        .to_string()
        .into_bytes();
    let signature = sign_paddle_payload("", Utc::now().timestamp(), &body);
    let response = app
        .server
        .post("/webhooks/paddle")
        .add_header("Paddle-Signature", signature)
        .bytes(Bytes::from(body))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let activated = subscription_event("evt_02", "subscription.activated", workspace.id);
    let body = activated.to_string().into_bytes();
    let signature = sign_paddle_payload("", Utc::now().timestamp(), &body);
    app.server
        .post("/webhooks/paddle")
        .add_header("Paddle-Signature", signature)
        .bytes(Bytes::from(body))
        .await;

    let response = app
        .server
        .get("/workspaces/acme/subscription")
        .add_header("Authorization", app.bearer(&owner))
        .await;
    let body: Value = response.json();
    assert_eq!(body["plan_details"]["name"], "Starter Plan");
}

#[tokio::test]
async fn test_paddle_subscription_lifecycle() {
    let app = create_test_app().await;
    let owner = app.seed_user("owner@servcy.com").await;
    let workspace = app.seed_workspace("acme", &owner).await;

    let response = app
        .server
        .get("/workspaces/acme/subscription")
        .add_header("Authorization", app.bearer(&owner))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["plan_details"]["name"], "Starter Plan");
    assert_eq!(body["is_trial"], true);

    let created = subscription_event("evt_01", "subscription.created", workspace.id);
    let response = post_paddle(&app, &created).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = post_paddle(&app, &created).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "Event already processed");

    let activated = subscription_event("evt_02", "subscription.activated", workspace.id);
    let response = post_paddle(&app, &activated).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/workspaces/acme/subscription")
        .add_header("Authorization", app.bearer(&owner))
        .await;
    let body: Value = response.json();
    assert_eq!(body["plan_details"]["name"], "Plus");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["limits"]["invitations"], 10);
}

#[tokio::test]
async fn test_paddle_unparseable_event() {
    let app = create_test_app().await;
    let body = b"not json".to_vec();
    let signature = sign_paddle_payload(PADDLE_SECRET, Utc::now().timestamp(), &body);

    let response = app
        .server
        .post("/webhooks/paddle")
        .add_header("Paddle-Signature", signature)
        .bytes(Bytes::from(body))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_razorpay_webhook() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/webhooks/razorpay")
        .json(&json!({ "event": "payment.captured" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.post("/webhooks/razorpay").text("oops").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
