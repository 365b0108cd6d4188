// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::integration::UserIntegration;
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::integration_repository::IntegrationRepository;
use crate::infrastructure::credentials::get_google_credentials;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth_user::AuthUser;
use crate::presentation::responses::{success, success_message};
use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct EventQuery {
    pub integration_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DisableEventPayload {
    #[serde(default)]
    pub actions: Vec<String>,
}

/// 读取调用者自己的用户集成
async fn owned_user_integration<G: IntegrationRepository>(
    integrations: &G,
    user_id: Uuid,
    id: Uuid,
) -> Result<UserIntegration, AppError> {
    integrations
        .find_user_integration(id)
        .await?
        .filter(|ui| ui.user_id == user_id)
        .ok_or_else(|| RepositoryError::NotFound.into())
}

pub async fn list_integrations<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
) -> Result<Json<Value>, AppError> {
    let items = integrations.list_integrations().await?;
    Ok(success("Integrations fetched successfully", items))
}

pub async fn list_user_integrations<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, AppError> {
    let items = integrations.list_user_integrations(user_id).await?;
    Ok(success("User integrations fetched successfully", items))
}

pub async fn revoke_user_integration<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    integrations.revoke_user_integration(user_id, id).await?;
    tracing::info!(user_integration_id = %id, "User integration revoked");
    Ok(success_message("Integration revoked successfully"))
}

pub async fn list_events<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Value>, AppError> {
    let events = integrations.list_events(query.integration_id).await?;
    Ok(success("Integration events fetched successfully", events))
}

pub async fn disable_event<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
    AuthUser(user_id): AuthUser,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DisableEventPayload>,
) -> Result<Json<Value>, AppError> {
    let user_integration = owned_user_integration(integrations.as_ref(), user_id, id).await?;
    let disabled = integrations
        .disable_event(user_integration.id, event_id, json!(payload.actions))
        .await?;
    Ok(success("Integration event disabled successfully", disabled))
}

pub async fn enable_event<G: IntegrationRepository>(
    Extension(integrations): Extension<Arc<G>>,
    AuthUser(user_id): AuthUser,
    Path((id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let user_integration = owned_user_integration(integrations.as_ref(), user_id, id).await?;
    integrations
        .enable_event(user_integration.id, event_id)
        .await?;
    Ok(success_message("Integration event enabled successfully"))
}

/// 前端拼接 Google 授权地址所需的公开参数
pub async fn google_oauth_config(
    Extension(settings): Extension<Arc<Settings>>,
) -> Result<Json<Value>, AppError> {
    let credentials = get_google_credentials(&settings.google_oauth)?;
    Ok(success("Google OAuth configuration", credentials))
}
