// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::inbox::{InboxQuery, InboxStatus};
use crate::domain::repositories::inbox_repository::InboxRepository;
use crate::presentation::errors::{ApiError, AppError};
use crate::presentation::extractors::auth_user::AuthUser;
use crate::presentation::responses::{success, success_message};
use axum::{extract::Path, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct InboxFilters {
    #[serde(default)]
    pub is_archived: bool,
    pub is_read: Option<bool>,
    pub category: Option<String>,
    pub status: Option<InboxStatus>,
    /// 集成名称
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

/// `POST /inbox/fetch` 请求体
#[derive(Debug, Default, Deserialize)]
pub struct FetchInboxPayload {
    #[serde(default)]
    pub filters: InboxFilters,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl From<FetchInboxPayload> for InboxQuery {
    fn from(payload: FetchInboxPayload) -> Self {
        Self {
            is_archived: payload.filters.is_archived,
            is_read: payload.filters.is_read,
            category: payload.filters.category,
            status: payload.filters.status,
            source: payload.filters.source,
            search: payload.search,
            page: payload.pagination.page.max(1),
            page_size: payload.pagination.page_size.clamp(1, 100),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadItemPayload {
    pub item_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ItemIdsPayload {
    #[serde(default)]
    pub item_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: InboxStatus,
    #[serde(default)]
    pub snoozed_till: Option<DateTime<Utc>>,
}

pub async fn fetch_items<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<FetchInboxPayload>,
) -> Result<Json<Value>, AppError> {
    let query = InboxQuery::from(payload);
    let page = inbox.list(user_id, &query).await?;
    Ok(success(
        "Inbox fetched successfully",
        json!({
            "items": page.items,
            "details": {
                "total": page.total,
                "page": page.page,
                "page_size": page.page_size,
            },
        }),
    ))
}

pub async fn unread_count<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, AppError> {
    let count = inbox.unread_count(user_id).await?;
    Ok(success(
        "Unread count fetched successfully",
        json!({ "unread_count": count }),
    ))
}

pub async fn read_item<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ReadItemPayload>,
) -> Result<Json<Value>, AppError> {
    let item_id = payload
        .item_id
        .ok_or_else(|| ApiError::BadRequest("No item to read".to_string()))?;
    inbox.read_item(user_id, item_id).await?;
    Ok(success_message("Inbox items read successfully"))
}

pub async fn archive_items<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ItemIdsPayload>,
) -> Result<Json<Value>, AppError> {
    if payload.item_ids.is_empty() {
        return Err(ApiError::BadRequest("No items to archive".to_string()).into());
    }
    let archived = inbox.archive_items(user_id, &payload.item_ids).await?;
    tracing::debug!(archived, "Archived inbox items");
    Ok(success_message("Inbox items archived successfully"))
}

pub async fn delete_items<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ItemIdsPayload>,
) -> Result<Json<Value>, AppError> {
    if payload.item_ids.is_empty() {
        return Err(ApiError::BadRequest("No items to delete".to_string()).into());
    }
    let deleted = inbox.delete_items(user_id, &payload.item_ids).await?;
    tracing::debug!(deleted, "Deleted inbox items");
    Ok(success_message("Inbox items deleted successfully"))
}

pub async fn update_status<I: InboxRepository>(
    Extension(inbox): Extension<Arc<I>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<Value>, AppError> {
    let item = inbox
        .update_status(user_id, id, payload.status, payload.snoozed_till)
        .await?;
    Ok(success("Inbox item updated successfully", item))
}
