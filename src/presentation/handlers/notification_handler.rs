// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::{
    Notification, NotificationFilter, NotificationPreference, PreferenceUpdate,
};
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::notification_repository::NotificationRepository;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::auth_user::AuthUser;
use crate::presentation::handlers::workspace_scope::member_workspace;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UpdateNotificationPayload {
    /// 缺省表示不修改，`null` 取消暂停
    #[serde(default, deserialize_with = "present")]
    pub snoozed_till: Option<Option<DateTime<Utc>>>,
}

/// 字段出现（包括 `null`）时包一层 `Some`，用于区分缺省与显式置空
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 读取调用者在工作空间内的某条通知，不存在或不属于调用者时返回 404
async fn owned_notification<N: NotificationRepository, A: AccountRepository>(
    notifications: &N,
    accounts: &A,
    slug: &str,
    id: Uuid,
    user_id: Uuid,
) -> Result<Notification, AppError> {
    let workspace = member_workspace(accounts, slug, user_id).await?;
    let notification = notifications
        .find_for_receiver(id, user_id, workspace.id)
        .await?
        .ok_or(RepositoryError::NotFound)?;
    Ok(notification)
}

pub async fn list_notifications<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path(slug): Path<String>,
    Query(filter): Query<NotificationFilter>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let workspace = member_workspace(accounts.as_ref(), &slug, user_id).await?;
    let items = notifications
        .list(user_id, workspace.id, filter, Utc::now())
        .await?;
    Ok(Json(items))
}

pub async fn get_notification<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<Notification>, AppError> {
    let notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    Ok(Json(notification))
}

pub async fn update_notification<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateNotificationPayload>,
) -> Result<Json<Notification>, AppError> {
    let mut notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    if let Some(snoozed_till) = payload.snoozed_till {
        notification.snoozed_till = snoozed_till;
    }
    notification.updated_by_id = Some(user_id);
    Ok(Json(notifications.update(&notification).await?))
}

pub async fn delete_notification<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    notifications.delete(notification.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 已读时间只在为空时写入
pub async fn mark_read<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<Notification>, AppError> {
    let mut notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    if notification.read_at.is_none() {
        notification.read_at = Some(Utc::now());
        notification = notifications.update(&notification).await?;
    }
    Ok(Json(notification))
}

pub async fn mark_unread<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<Notification>, AppError> {
    let mut notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    notification.read_at = None;
    Ok(Json(notifications.update(&notification).await?))
}

pub async fn archive<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<Notification>, AppError> {
    let mut notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    if notification.archived_at.is_none() {
        notification.archived_at = Some(Utc::now());
        notification = notifications.update(&notification).await?;
    }
    Ok(Json(notification))
}

pub async fn unarchive<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path((slug, id)): Path<(String, Uuid)>,
) -> Result<Json<Notification>, AppError> {
    let mut notification =
        owned_notification(notifications.as_ref(), accounts.as_ref(), &slug, id, user_id).await?;
    notification.archived_at = None;
    Ok(Json(notifications.update(&notification).await?))
}

pub async fn unread_count<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workspace = member_workspace(accounts.as_ref(), &slug, user_id).await?;
    let count = notifications
        .unread_count(user_id, workspace.id, Utc::now())
        .await?;
    Ok(Json(json!({ "total_unread_notifications_count": count })))
}

pub async fn mark_all_read<N: NotificationRepository, A: AccountRepository>(
    Extension(notifications): Extension<Arc<N>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workspace = member_workspace(accounts.as_ref(), &slug, user_id).await?;
    let updated = notifications
        .mark_all_read(user_id, workspace.id, Utc::now())
        .await?;
    tracing::info!(workspace = %slug, updated, "Marked all notifications as read");
    Ok(Json(json!({ "updated": updated })))
}

async fn load_preference<N: NotificationRepository>(
    notifications: &N,
    user_id: Uuid,
) -> Result<NotificationPreference, AppError> {
    match notifications.find_preference(user_id).await? {
        Some(preference) => Ok(preference),
        None => Ok(notifications
            .save_preference(&NotificationPreference::new(user_id))
            .await?),
    }
}

/// 首次访问时以默认值创建
pub async fn get_preferences<N: NotificationRepository>(
    Extension(notifications): Extension<Arc<N>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<NotificationPreference>, AppError> {
    Ok(Json(load_preference(notifications.as_ref(), user_id).await?))
}

pub async fn update_preferences<N: NotificationRepository>(
    Extension(notifications): Extension<Arc<N>>,
    AuthUser(user_id): AuthUser,
    Json(update): Json<PreferenceUpdate>,
) -> Result<Json<NotificationPreference>, AppError> {
    let mut preference = load_preference(notifications.as_ref(), user_id).await?;
    preference.apply(&update);
    Ok(Json(notifications.save_preference(&preference).await?))
}
