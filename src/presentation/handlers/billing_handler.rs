// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::subscription::starter_plan;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::domain::services::billing_service::{
    verify_paddle_signature, BillingService, EventOutcome,
};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth_user::AuthUser;
use crate::presentation::handlers::workspace_scope::member_workspace;
use axum::{
    body::Bytes,
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::Value;
use std::sync::Arc;

const PADDLE_SIGNATURE_HEADER: &str = "paddle-signature";

/// 工作空间当前订阅，没有有效订阅时返回免费试用套餐
pub async fn get_subscription<S: SubscriptionRepository, A: AccountRepository>(
    Extension(billing): Extension<Arc<BillingService<S>>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workspace = member_workspace(accounts.as_ref(), &slug, user_id).await?;
    let results = match billing.active_subscription(workspace.id).await? {
        Some(subscription) => serde_json::to_value(subscription)?,
        None => starter_plan(),
    };
    Ok(Json(results))
}

/// Paddle 计费事件
pub async fn paddle_webhook<S: SubscriptionRepository>(
    Extension(billing): Extension<Arc<BillingService<S>>>,
    Extension(settings): Extension<Arc<Settings>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if settings.paddle.webhook_secret.is_empty() {
        tracing::error!("Paddle Webhook rejected: paddle.webhook_secret is not configured");
        return StatusCode::FORBIDDEN.into_response();
    }

    let signature = headers
        .get(PADDLE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !verify_paddle_signature(&settings.paddle.webhook_secret, signature, &body) {
        tracing::error!("Paddle Webhook failed due to signature mismatch");
        return StatusCode::FORBIDDEN.into_response();
    }

    let event: Value = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(error = %e, "Paddle Webhook failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match billing.process_event(&event).await {
        Ok(EventOutcome::Processed) => StatusCode::OK.into_response(),
        Ok(EventOutcome::AlreadyProcessed) => {
            (StatusCode::OK, "Event already processed").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Paddle Webhook failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn razorpay_webhook(body: Bytes) -> StatusCode {
    match serde_json::from_slice::<Value>(&body) {
        Ok(event) => {
            let event = event.get("event").and_then(Value::as_str).unwrap_or_default();
            tracing::info!(event, "Razorpay Webhook success");
            StatusCode::OK
        }
        Err(e) => {
            tracing::error!(error = %e, "Razorpay Webhook failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn jira_webhook(body: Bytes) -> StatusCode {
    tracing::info!(bytes = body.len(), "Jira webhook received.");
    StatusCode::OK
}
