// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::subscription::{Subscription, SubscriptionWebhookEvent};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::infrastructure::database::entities::{subscription, subscription_webhook_event};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 订阅仓库实现
#[derive(Clone)]
pub struct SubscriptionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryImpl {
    async fn find_active_for_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let model = subscription::Entity::find()
            .filter(subscription::Column::WorkspaceId.eq(workspace_id))
            .filter(subscription::Column::IsActive.eq(true))
            .order_by_desc(subscription::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let model = subscription::Entity::find()
            .filter(subscription::Column::SubscriptionId.eq(subscription_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, sub: &Subscription) -> Result<Subscription, RepositoryError> {
        let model = subscription::ActiveModel {
            id: Set(sub.id),
            workspace_id: Set(sub.workspace_id),
            is_active: Set(sub.is_active),
            plan_details: Set(sub.plan_details.clone()),
            customer_details: Set(sub.customer_details.clone()),
            subscription_id: Set(sub.subscription_id.clone()),
            limits: Set(sub.limits.clone()),
            created_by_id: Set(None),
            updated_by_id: Set(None),
            created_at: Set(sub.created_at.into()),
            updated_at: Set(sub.updated_at.into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn set_active(
        &self,
        subscription_id: &str,
        active: bool,
    ) -> Result<u64, RepositoryError> {
        let result = subscription::Entity::update_many()
            .col_expr(subscription::Column::IsActive, Expr::value(active))
            .col_expr(
                subscription::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(subscription::Column::SubscriptionId.eq(subscription_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn event_exists(&self, event_id: &str) -> Result<bool, RepositoryError> {
        let count = subscription_webhook_event::Entity::find()
            .filter(subscription_webhook_event::Column::EventId.eq(event_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn record_event(&self, event: &SubscriptionWebhookEvent) -> Result<(), RepositoryError> {
        subscription_webhook_event::ActiveModel {
            id: Set(event.id),
            event_id: Set(event.event_id.clone()),
            event_type: Set(event.event_type.clone()),
            payload: Set(event.payload.clone()),
            created_at: Set(event.created_at.into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(())
    }
}

impl From<subscription::Model> for Subscription {
    fn from(model: subscription::Model) -> Self {
        Self {
            id: model.id,
            workspace_id: model.workspace_id,
            is_active: model.is_active,
            plan_details: model.plan_details,
            customer_details: model.customer_details,
            subscription_id: model.subscription_id,
            limits: model.limits,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
