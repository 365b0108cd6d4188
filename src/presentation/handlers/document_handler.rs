// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::{Document, NewDocument};
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::presentation::errors::{ApiError, AppError};
use crate::presentation::extractors::auth_user::AuthUser;
use crate::presentation::responses::{success, success_message};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct DocumentSearch {
    pub search: Option<String>,
}

pub async fn list_documents<D: DocumentRepository>(
    Extension(documents): Extension<Arc<D>>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<DocumentSearch>,
) -> Result<Json<Value>, AppError> {
    let items = documents.list(user_id, params.search.as_deref()).await?;
    Ok(success("Documents fetched successfully", items))
}

/// 创建文档，指定工作空间时调用者必须是其成员
pub async fn create_document<D: DocumentRepository, A: AccountRepository>(
    Extension(documents): Extension<Arc<D>>,
    Extension(accounts): Extension<Arc<A>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<NewDocument>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    if let Some(workspace_id) = payload.workspace_id {
        if !accounts.is_member(workspace_id, user_id).await? {
            return Err(
                ApiError::Forbidden("You are not a member of this workspace".to_string()).into(),
            );
        }
    }

    let document = documents
        .create(&Document::create(payload, user_id))
        .await?;
    tracing::info!(document_id = %document.id, "Document created");
    Ok((
        StatusCode::CREATED,
        success("Document created successfully", document),
    ))
}

pub async fn get_document<D: DocumentRepository>(
    Extension(documents): Extension<Arc<D>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let document = documents
        .find(user_id, id)
        .await?
        .ok_or(RepositoryError::NotFound)?;
    Ok(success("Document fetched successfully", document))
}

/// 软删除
pub async fn delete_document<D: DocumentRepository>(
    Extension(documents): Extension<Arc<D>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    documents.set_deleted(user_id, id, true).await?;
    Ok(success_message("Document deleted successfully"))
}

pub async fn restore_document<D: DocumentRepository>(
    Extension(documents): Extension<Arc<D>>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    documents.set_deleted(user_id, id, false).await?;
    Ok(success_message("Document restored successfully"))
}
