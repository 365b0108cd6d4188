// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::inbox::NewInboxItem;
use crate::domain::models::integration::OUTLOOK;
use crate::domain::repositories::inbox_repository::InboxRepository;
use crate::domain::repositories::integration_repository::IntegrationRepository;
use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const HOOK_SECRET: &str = "x-hook-secret";
const HOOK_SIGNATURE: &str = "x-hook-signature";

/// Asana 事件，既接受 `{"events": [...]}` 也接受裸数组
fn asana_events(body: &[u8]) -> Result<Vec<Value>, serde_json::Error> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Array(events) => Ok(events),
        Value::Object(mut map) => match map.remove("events") {
            Some(Value::Array(events)) => Ok(events),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

fn log_asana_event(event: &Value) {
    if event.pointer("/resource/resource_type").and_then(Value::as_str) != Some("task") {
        return;
    }
    let task_id = event
        .pointer("/resource/gid")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let action = event.get("action").and_then(Value::as_str).unwrap_or_default();

    if action == "changed" {
        let changes = match event.get("change") {
            Some(Value::Array(changes)) => changes.clone(),
            Some(change) => vec![change.clone()],
            None => Vec::new(),
        };
        for change in changes {
            let field = change.get("field").and_then(Value::as_str).unwrap_or_default();
            let change_action = change.get("action").and_then(Value::as_str).unwrap_or_default();
            tracing::info!(task_id, field, change_action, "Asana task changed");
        }
    } else {
        tracing::info!(task_id, action, "Asana task event");
    }
}

/// Asana Webhook
///
/// 握手请求携带 `X-Hook-Secret`，需原样回写同名响应头
pub async fn asana(
    Path(user_integration_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = headers.get(HOOK_SECRET) {
        let mut response = StatusCode::OK.into_response();
        response.headers_mut().insert(HOOK_SECRET, secret.clone());
        return response;
    }

    if !headers.contains_key(HOOK_SIGNATURE) {
        tracing::warn!(
            %user_integration_id,
            "Received an unknown request from Asana webhook."
        );
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    }

    match asana_events(&body) {
        Ok(events) => {
            events.iter().for_each(log_asana_event);
            tracing::info!(%user_integration_id, events = events.len(), "Asana webhook received.");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                "OK",
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(
                %user_integration_id,
                error = %e,
                "An error occurred while processing asana webhook."
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MicrosoftQuery {
    #[serde(rename = "validationToken")]
    pub validation_token: Option<String>,
}

/// Graph 变更通知中的第一条记录
struct MailNotification {
    account_id: String,
    resource: Value,
}

fn parse_mail_notification(body: &[u8]) -> Option<MailNotification> {
    let notification: Value = serde_json::from_slice(body).ok()?;
    let first = notification.get("value")?.get(0)?;
    Some(MailNotification {
        account_id: first.get("clientState")?.as_str()?.to_string(),
        resource: first.get("resourceData")?.clone(),
    })
}

fn mail_inbox_item(resource: &Value, user_integration_id: uuid::Uuid) -> Option<NewInboxItem> {
    let uid = resource.get("id")?.as_str()?.to_string();
    let title = resource
        .get("subject")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("New email")
        .to_string();
    Some(NewInboxItem {
        uid,
        title,
        body: resource
            .get("bodyPreview")
            .and_then(Value::as_str)
            .map(str::to_string),
        cause: resource.get("from").map(Value::to_string),
        is_body_html: false,
        user_integration_id,
        category: Some("message".to_string()),
        i_am_mentioned: false,
        attachments: None,
    })
}

/// Microsoft Graph 邮件通知
///
/// 订阅校验请求带 `validationToken`，需以纯文本回显
pub async fn microsoft<G: IntegrationRepository, I: InboxRepository>(
    Extension(integrations): Extension<Arc<G>>,
    Extension(inbox): Extension<Arc<I>>,
    Query(query): Query<MicrosoftQuery>,
    body: Bytes,
) -> Response {
    if let Some(token) = query.validation_token.filter(|t| !t.is_empty()) {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
            token,
        )
            .into_response();
    }

    let Some(notification) = parse_mail_notification(&body) else {
        tracing::error!("A key error occurred while processing microsoft notification.");
        return StatusCode::OK.into_response();
    };

    let result: anyhow::Result<Response> = async {
        let Some(outlook) = integrations.find_integration_by_name(OUTLOOK).await? else {
            return Ok(not_found_integration(&notification.account_id));
        };
        let Some(user_integration) = integrations
            .find_user_integration_by_account(outlook.id, &notification.account_id)
            .await?
        else {
            return Ok(not_found_integration(&notification.account_id));
        };

        let Some(item) = mail_inbox_item(&notification.resource, user_integration.id) else {
            tracing::error!("Microsoft notification is missing the message id.");
            return Ok(StatusCode::OK.into_response());
        };

        let (_, created) = inbox.add_item(&item).await?;
        if !created {
            tracing::debug!(uid = %item.uid, "Outlook message already in inbox");
        }
        Ok(StatusCode::OK.into_response())
    }
    .await;

    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "An error occurred while processing notification.");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

fn not_found_integration(account_id: &str) -> Response {
    tracing::error!(account_id, "No integration found for outlook");
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "No integration found for email." })),
    )
        .into_response()
}

fn log_receipt(source: &'static str, headers: &HeaderMap, body: &[u8]) -> StatusCode {
    let event = headers
        .get("x-github-event")
        .or_else(|| headers.get("x-goog-resource-state"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info!(source, event, bytes = body.len(), "Webhook received");
    StatusCode::OK
}

pub async fn figma(headers: HeaderMap, body: Bytes) -> StatusCode {
    log_receipt("figma", &headers, &body)
}

pub async fn github(headers: HeaderMap, body: Bytes) -> StatusCode {
    log_receipt("github", &headers, &body)
}

pub async fn slack(headers: HeaderMap, body: Bytes) -> StatusCode {
    log_receipt("slack", &headers, &body)
}

pub async fn google(headers: HeaderMap, body: Bytes) -> StatusCode {
    log_receipt("google", &headers, &body)
}

pub async fn trello(
    Path(user_integration_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    tracing::debug!(%user_integration_id, "Trello webhook");
    log_receipt("trello", &headers, &body)
}
