// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};
use servcy::domain::models::account::{MemberRole, User, Workspace};
use servcy::domain::models::notification::Notification;
use servcy::domain::repositories::account_repository::AccountRepository;
use servcy::domain::services::notification_service::{Activity, NotificationService};

fn state_change(workspace: &Workspace, actor: &User, identifier: i64) -> Activity {
    Activity {
        workspace_id: workspace.id,
        project_id: None,
        actor_id: actor.id,
        entity_name: "issue".to_string(),
        entity_identifier: Some(identifier),
        title: format!("Issue {} moved to Done", identifier),
        field: "state".to_string(),
        verb: "updated".to_string(),
        old_value: Some("Todo".to_string()),
        new_value: Some("Done".to_string()),
    }
}

#[tokio::test]
async fn test_notification_inbox_flow() {
    let app = create_test_app().await;
    let actor = app.seed_user("actor@servcy.com").await;
    let alice = app.seed_user("alice@servcy.com").await;
    let workspace = app.seed_workspace("acme", &actor).await;
    app.state
        .accounts
        .add_member(workspace.id, alice.id, MemberRole::Member)
        .await
        .unwrap();

    let service = NotificationService::new(app.state.notifications.clone());
    let first = service
        .notify(&state_change(&workspace, &actor, 1), &[alice.id, actor.id])
        .await
        .unwrap();
    service
        .notify(&state_change(&workspace, &actor, 2), &[alice.id])
        .await
        .unwrap();
    assert_eq!(first.len(), 1);

    let base = "/workspaces/acme/users/notifications";
    let auth = app.bearer(&alice);

    let response = app.server.get(base).add_header("Authorization", auth.clone()).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let items: Vec<Notification> = response.json();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|n| n.receiver_id == alice.id));

    let response = app
        .server
        .get(&format!("{}/unread", base))
        .add_header("Authorization", auth.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_unread_notifications_count"], 2);

    let id = first[0].id;
    let response = app
        .server
        .post(&format!("{}/{}/read", base, id))
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let read: Notification = response.json();
    assert!(read.read_at.is_some());

    let response = app
        .server
        .post(&format!("{}/{}/archive", base, id))
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.get(base).add_header("Authorization", auth.clone()).await;
    let items: Vec<Notification> = response.json();
    assert_eq!(items.len(), 1);

    let response = app
        .server
        .get(base)
        .add_query_param("archived", true)
        .add_header("Authorization", auth.clone())
        .await;
    let items: Vec<Notification> = response.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);

    let response = app
        .server
        .post(&format!("{}/read", base))
        .add_header("Authorization", auth.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["updated"], 1);

    let response = app
        .server
        .get(&format!("{}/unread", base))
        .add_header("Authorization", auth)
        .await;
    let body: Value = response.json();
    assert_eq!(body["total_unread_notifications_count"], 0);
}

#[tokio::test]
async fn test_notifications_of_others_are_hidden() {
    let app = create_test_app().await;
    let actor = app.seed_user("actor@servcy.com").await;
    let alice = app.seed_user("alice@servcy.com").await;
    let workspace = app.seed_workspace("acme", &actor).await;

    let created = NotificationService::new(app.state.notifications.clone())
        .notify(&state_change(&workspace, &alice, 1), &[actor.id])
        .await
        .unwrap();

    let response = app
        .server
        .get("/workspaces/acme/users/notifications")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/workspaces/missing/users/notifications")
        .add_header("Authorization", app.bearer(&actor))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let owner_view = format!("/workspaces/acme/users/notifications/{}", created[0].id);
    let response = app
        .server
        .get(&owner_view)
        .add_header("Authorization", app.bearer(&actor))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .delete(&owner_view)
        .add_header("Authorization", app.bearer(&actor))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&owner_view)
        .add_header("Authorization", app.bearer(&actor))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preferences_default_then_update() {
    let app = create_test_app().await;
    let alice = app.seed_user("alice@servcy.com").await;

    let response = app
        .server
        .get("/users/me/notification-preferences")
        .add_header("Authorization", app.bearer(&alice))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["comment"], true);

    let response = app
        .server
        .patch("/users/me/notification-preferences")
        .add_header("Authorization", app.bearer(&alice))
        .json(&json!({ "comment": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["comment"], false);
    assert_eq!(body["mention"], true);
}

#[tokio::test]
async fn test_snooze_survives_empty_patch() {
    let app = create_test_app().await;
    let actor = app.seed_user("actor@servcy.com").await;
    let workspace = app.seed_workspace("acme", &actor).await;
    let alice = app.seed_user("alice@servcy.com").await;
    app.state
        .accounts
        .add_member(workspace.id, alice.id, MemberRole::Member)
        .await
        .unwrap();
    let created = NotificationService::new(app.state.notifications.clone())
        .notify(&state_change(&workspace, &actor, 1), &[alice.id])
        .await
        .unwrap();
    let path = format!("/workspaces/acme/users/notifications/{}", created[0].id);
    let auth = app.bearer(&alice);

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", auth.clone())
        .json(&json!({ "snoozed_till": "2030-01-01T00:00:00Z" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let snoozed: Notification = response.json();
    assert!(snoozed.snoozed_till.is_some());

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", auth.clone())
        .json(&json!({}))
        .await;
    let unchanged: Notification = response.json();
    assert_eq!(unchanged.snoozed_till, snoozed.snoozed_till);

    let response = app
        .server
        .patch(&path)
        .add_header("Authorization", auth)
        .json(&json!({ "snoozed_till": null }))
        .await;
    let cleared: Notification = response.json();
    assert!(cleared.snoozed_till.is_none());
}
