// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::integration::{
    DisabledUserIntegrationEvent, Integration, IntegrationEvent, NewUserIntegration,
    UserIntegration,
};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::integration_repository::IntegrationRepository;
use crate::infrastructure::database::entities::{
    disabled_user_integration_event, integration, integration_event, user_integration,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 集成仓库实现
#[derive(Clone)]
pub struct IntegrationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl IntegrationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_by_unique_key(
        &self,
        input: &NewUserIntegration,
    ) -> Result<Option<user_integration::Model>, DbErr> {
        user_integration::Entity::find()
            .filter(user_integration::Column::UserId.eq(input.user_id))
            .filter(user_integration::Column::IntegrationId.eq(input.integration_id))
            .filter(user_integration::Column::AccountId.eq(input.account_id.as_str()))
            .one(self.db.as_ref())
            .await
    }
}

#[async_trait]
impl IntegrationRepository for IntegrationRepositoryImpl {
    async fn list_integrations(&self) -> Result<Vec<Integration>, RepositoryError> {
        let models = integration::Entity::find()
            .order_by_asc(integration::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_integration_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Integration>, RepositoryError> {
        let model = integration::Entity::find()
            .filter(integration::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn create_integration(
        &self,
        integration: &Integration,
    ) -> Result<Integration, RepositoryError> {
        let model = integration::ActiveModel {
            id: Set(integration.id),
            name: Set(integration.name.clone()),
            logo: Set(integration.logo.clone()),
            description: Set(integration.description.clone()),
            configure_at: Set(integration.configure_at.clone()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn upsert_user_integration(
        &self,
        input: &NewUserIntegration,
    ) -> Result<UserIntegration, RepositoryError> {
        let now = Utc::now();
        if let Some(existing) = self.find_by_unique_key(input).await? {
            let mut active: user_integration::ActiveModel = existing.into();
            active.meta_data = Set(input.meta_data.clone());
            active.account_display_name = Set(input.account_display_name.clone());
            if input.configuration.is_some() {
                active.configuration = Set(input.configuration.clone());
            }
            active.is_revoked = Set(false);
            active.updated_at = Set(now.into());
            let model = active.update(self.db.as_ref()).await?;
            return Ok(model.into());
        }

        let model = user_integration::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(input.account_id.clone()),
            account_display_name: Set(input.account_display_name.clone()),
            user_id: Set(input.user_id),
            integration_id: Set(input.integration_id),
            meta_data: Set(input.meta_data.clone()),
            configuration: Set(input.configuration.clone()),
            is_revoked: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn find_user_integration(
        &self,
        id: Uuid,
    ) -> Result<Option<UserIntegration>, RepositoryError> {
        let model = user_integration::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_user_integration_by_account(
        &self,
        integration_id: Uuid,
        account_id: &str,
    ) -> Result<Option<UserIntegration>, RepositoryError> {
        let model = user_integration::Entity::find()
            .filter(user_integration::Column::IntegrationId.eq(integration_id))
            .filter(user_integration::Column::AccountId.eq(account_id))
            .filter(user_integration::Column::IsRevoked.eq(false))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_user_integrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserIntegration>, RepositoryError> {
        let models = user_integration::Entity::find()
            .filter(user_integration::Column::UserId.eq(user_id))
            .filter(user_integration::Column::IsRevoked.eq(false))
            .order_by_asc(user_integration::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn revoke_user_integration(&self, user_id: Uuid, id: Uuid) -> Result<(), RepositoryError> {
        let model = user_integration::Entity::find_by_id(id)
            .filter(user_integration::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: user_integration::ActiveModel = model.into();
        active.is_revoked = Set(true);
        active.updated_at = Set(Utc::now().into());
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn create_event(
        &self,
        event: &IntegrationEvent,
    ) -> Result<IntegrationEvent, RepositoryError> {
        let model = integration_event::ActiveModel {
            id: Set(event.id),
            integration_id: Set(event.integration_id),
            name: Set(event.name.clone()),
            description: Set(event.description.clone()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn list_events(
        &self,
        integration_id: Uuid,
    ) -> Result<Vec<IntegrationEvent>, RepositoryError> {
        let models = integration_event::Entity::find()
            .filter(integration_event::Column::IntegrationId.eq(integration_id))
            .order_by_asc(integration_event::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn disable_event(
        &self,
        user_integration_id: Uuid,
        integration_event_id: Uuid,
        actions: serde_json::Value,
    ) -> Result<DisabledUserIntegrationEvent, RepositoryError> {
        let now = Utc::now();
        let existing = disabled_user_integration_event::Entity::find()
            .filter(
                disabled_user_integration_event::Column::UserIntegrationId.eq(user_integration_id),
            )
            .filter(
                disabled_user_integration_event::Column::IntegrationEventId
                    .eq(integration_event_id),
            )
            .one(self.db.as_ref())
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active: disabled_user_integration_event::ActiveModel = model.into();
                active.actions = Set(actions);
                active.updated_at = Set(now.into());
                active.update(self.db.as_ref()).await?
            }
            None => {
                disabled_user_integration_event::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_integration_id: Set(user_integration_id),
                    integration_event_id: Set(integration_event_id),
                    actions: Set(actions),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                }
                .insert(self.db.as_ref())
                .await?
            }
        };
        Ok(model.into())
    }

    async fn enable_event(
        &self,
        user_integration_id: Uuid,
        integration_event_id: Uuid,
    ) -> Result<(), RepositoryError> {
        let result = disabled_user_integration_event::Entity::delete_many()
            .filter(
                disabled_user_integration_event::Column::UserIntegrationId.eq(user_integration_id),
            )
            .filter(
                disabled_user_integration_event::Column::IntegrationEventId
                    .eq(integration_event_id),
            )
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl From<integration::Model> for Integration {
    fn from(model: integration::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
            description: model.description,
            configure_at: model.configure_at,
        }
    }
}

impl From<user_integration::Model> for UserIntegration {
    fn from(model: user_integration::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            account_display_name: model.account_display_name,
            user_id: model.user_id,
            integration_id: model.integration_id,
            meta_data: model.meta_data,
            configuration: model.configuration,
            is_revoked: model.is_revoked,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<integration_event::Model> for IntegrationEvent {
    fn from(model: integration_event::Model) -> Self {
        Self {
            id: model.id,
            integration_id: model.integration_id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<disabled_user_integration_event::Model> for DisabledUserIntegrationEvent {
    fn from(model: disabled_user_integration_event::Model) -> Self {
        Self {
            id: model.id,
            user_integration_id: model.user_integration_id,
            integration_event_id: model.integration_event_id,
            actions: model.actions,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
