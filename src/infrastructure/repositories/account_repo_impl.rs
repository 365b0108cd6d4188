// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::{MemberRole, User, Workspace};
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::infrastructure::database::entities::{
    blacklisted_token, user, workspace, workspace_member,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 账户仓库实现
#[derive(Clone)]
pub struct AccountRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        let model = user::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            display_name: Set(user.display_name.clone()),
            phone_number: Set(user.phone_number.clone()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        };
        let model = model.insert(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = user::Entity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create_workspace(&self, workspace: &Workspace) -> Result<Workspace, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = workspace::ActiveModel {
            id: Set(workspace.id),
            slug: Set(workspace.slug.clone()),
            name: Set(workspace.name.clone()),
            owner_id: Set(workspace.owner_id),
            created_at: Set(workspace.created_at.into()),
            updated_at: Set(workspace.updated_at.into()),
        }
        .insert(&txn)
        .await?;

        workspace_member::ActiveModel {
            id: Set(Uuid::new_v4()),
            workspace_id: Set(workspace.id),
            member_id: Set(workspace.owner_id),
            role: Set(MemberRole::Admin.code()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model.into())
    }

    async fn find_workspace_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Workspace>, RepositoryError> {
        let model = workspace::Entity::find()
            .filter(workspace::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn add_member(
        &self,
        workspace_id: Uuid,
        member_id: Uuid,
        role: MemberRole,
    ) -> Result<(), RepositoryError> {
        workspace_member::ActiveModel {
            id: Set(Uuid::new_v4()),
            workspace_id: Set(workspace_id),
            member_id: Set(member_id),
            role: Set(role.code()),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }

    async fn is_member(&self, workspace_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let count = workspace_member::Entity::find()
            .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
            .filter(workspace_member::Column::MemberId.eq(user_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn blacklist_token(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        blacklisted_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            jti: Set(jti),
            user_id: Set(user_id),
            expires_at: Set(expires_at.into()),
            blacklisted_at: Set(Utc::now().into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }

    async fn is_blacklisted(&self, jti: Uuid) -> Result<bool, RepositoryError> {
        let count = blacklisted_token::Entity::find()
            .filter(blacklisted_token::Column::Jti.eq(jti))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            display_name: model.display_name,
            phone_number: model.phone_number,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<workspace::Model> for Workspace {
    fn from(model: workspace::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name: model.name,
            owner_id: model.owner_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
