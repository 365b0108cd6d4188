// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::document::Document;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::infrastructure::database::entities::document;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 文档仓库实现
#[derive(Clone)]
pub struct DocumentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl DocumentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentRepository for DocumentRepositoryImpl {
    async fn create(&self, doc: &Document) -> Result<Document, RepositoryError> {
        let model = document::ActiveModel {
            id: Set(doc.id),
            name: Set(doc.name.clone()),
            file: Set(doc.file.clone()),
            link: Set(doc.link.clone()),
            meta_data: Set(doc.meta_data.clone()),
            workspace_id: Set(doc.workspace_id),
            is_deleted: Set(doc.is_deleted),
            created_by_id: Set(doc.created_by_id),
            updated_by_id: Set(doc.updated_by_id),
            created_at: Set(doc.created_at.into()),
            updated_at: Set(doc.updated_at.into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Document>, RepositoryError> {
        let mut query = document::Entity::find()
            .filter(document::Column::CreatedById.eq(owner_id))
            .filter(document::Column::IsDeleted.eq(false));
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query = query.filter(document::Column::Name.contains(search.trim()));
        }
        let models = query
            .order_by_asc(document::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Document>, RepositoryError> {
        let model = document::Entity::find_by_id(id)
            .filter(document::Column::CreatedById.eq(owner_id))
            .filter(document::Column::IsDeleted.eq(false))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn set_deleted(
        &self,
        owner_id: Uuid,
        id: Uuid,
        deleted: bool,
    ) -> Result<(), RepositoryError> {
        let model = document::Entity::find_by_id(id)
            .filter(document::Column::CreatedById.eq(owner_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: document::ActiveModel = model.into();
        active.is_deleted = Set(deleted);
        active.updated_by_id = Set(Some(owner_id));
        active.updated_at = Set(Utc::now().into());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }
}

impl From<document::Model> for Document {
    fn from(model: document::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            file: model.file,
            link: model.link,
            meta_data: model.meta_data,
            workspace_id: model.workspace_id,
            is_deleted: model.is_deleted,
            created_by_id: model.created_by_id,
            updated_by_id: model.updated_by_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
