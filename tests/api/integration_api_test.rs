// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with, test_settings};
use axum::http::StatusCode;
use serde_json::{json, Value};
use servcy::config::settings::GoogleOAuthSettings;
use servcy::domain::models::integration::IntegrationEvent;
use servcy::domain::repositories::integration_repository::IntegrationRepository;
use uuid::Uuid;

#[tokio::test]
async fn test_list_integrations_and_user_integrations() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let bob = app.seed_user("bob@servcy.com").await;
    let gmail = app.seed_user_integration(&alice, "Gmail", "alice@gmail.com").await;
    app.seed_user_integration(&bob, "Slack", "T0123").await;

    let response = app
        .server
        .get("/integrations")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let response = app
        .server
        .get("/integrations/user-integration")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let items = body["results"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], gmail.id.to_string());
    assert!(items[0].get("meta_data").is_none());

    let response = app.server.get("/integrations/user-integration").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoke_is_scoped_to_owner() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let bob = app.seed_user("bob@servcy.com").await;
    let gmail = app.seed_user_integration(&alice, "Gmail", "alice@gmail.com").await;
    let path = format!("/integrations/user-integration/{}", gmail.id);

    let response = app
        .server
        .delete(&path)
        .add_header("Authorization", app.bearer(&bob))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.state.integrations.list_user_integrations(alice.id).await.unwrap().len(),
        1
    );

    let response = app
        .server
        .delete(&path)
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(app
        .state
        .integrations
        .list_user_integrations(alice.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_disable_then_enable_event() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;
    let bob = app.seed_user("bob@servcy.com").await;
    let github = app.seed_user_integration(&alice, "Github", "alice-gh").await;
    let event = app
        .state
        .integrations
        .create_event(&IntegrationEvent {
            id: Uuid::new_v4(),
            integration_id: github.integration_id,
            name: "push".to_string(),
            description: Some("Commits pushed".to_string()),
        })
        .await
        .unwrap();

    let response = app
        .server
        .get("/integrations/integration-event")
        .add_query_param("integration_id", github.integration_id)
        .add_header("Authorization", app.bearer(&alice))
        .await;
    let body: Value = response.json();
    assert_eq!(body["results"][0]["name"], "push");

    let path = format!("/integrations/user-integration/{}/events/{}", github.id, event.id);

    let response = app
        .server
        .put(&path)
        .add_header("Authorization", app.bearer(&bob))
        .json(&json!({ "actions": ["notify"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .put(&path)
        .add_header("Authorization", app.bearer(&alice))
        .json(&json!({ "actions": ["notify"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"]["integration_event_id"], event.id.to_string());
    assert_eq!(body["results"]["actions"], json!(["notify"]));

    let response = app
        .server
        .delete(&path)
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // 已经启用的事件再次启用
    let response = app
        .server
        .delete(&path)
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_google_oauth_config_hides_client_secret() {
    let mut settings = test_settings();
    settings.google_oauth = GoogleOAuthSettings {
        client_id: Some("client-id".to_string()),
        client_secret: Some("super-secret".to_string()),
        token_uri: Some("https://oauth2.googleapis.com/token".to_string()),
        auth_uri: Some("https://accounts.google.com/o/oauth2/auth".to_string()),
        redirect_uri: Some("https://app.servcy.com/integrations/oauth/google".to_string()),
        scopes: Some("openid email".to_string()),
        user_info_uri: Some("https://www.googleapis.com/oauth2/v3/userinfo".to_string()),
    };
    let app = create_test_app_with(settings).await;
    let alice = app.seed_user("alice@servcy.com").await;

    let response = app
        .server
        .get("/integrations/oauth/google")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["results"]["client_id"], "client-id");
    assert_eq!(body["results"]["scopes"], json!(["openid", "email"]));
    assert!(body["results"].get("client_secret").is_none());
    assert!(!response.text().contains("super-secret"));
}

#[tokio::test]
async fn test_google_oauth_config_without_credentials_fails() {
    let mut settings = test_settings();
    settings.google_oauth = GoogleOAuthSettings {
        client_id: Some("client-id".to_string()),
        ..Default::default()
    };
    let app = create_test_app_with(settings).await;
    let alice = app.seed_user("alice@servcy.com").await;

    let response = app
        .server
        .get("/integrations/oauth/google")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["detail"], "An error occurred. Please try again later!");
}
