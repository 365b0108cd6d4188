// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::{
    EmailNotificationLog, Notification, NotificationFilter, NotificationPreference,
};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::notification_repository::NotificationRepository;
use crate::infrastructure::database::entities::{
    email_notification_log, notification, user_notification_preference,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 通知仓库实现
#[derive(Clone)]
pub struct NotificationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn scoped(receiver_id: Uuid, workspace_id: Uuid) -> Select<notification::Entity> {
        notification::Entity::find()
            .filter(notification::Column::ReceiverId.eq(receiver_id))
            .filter(notification::Column::WorkspaceId.eq(workspace_id))
    }
}

/// 不在暂停期内：未设置或已到期
fn not_snoozed(now: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(notification::Column::SnoozedTill.is_null())
        .add(notification::Column::SnoozedTill.lte(now))
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError> {
        let model = notification::ActiveModel::from(notification.clone())
            .insert(self.db.as_ref())
            .await?;
        Ok(model.into())
    }

    async fn find_for_receiver(
        &self,
        id: Uuid,
        receiver_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Notification>, RepositoryError> {
        let model = Self::scoped(receiver_id, workspace_id)
            .filter(notification::Column::Id.eq(id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        filter: NotificationFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut query = Self::scoped(receiver_id, workspace_id);

        query = if filter.snoozed {
            query.filter(notification::Column::SnoozedTill.gt(now))
        } else {
            query.filter(not_snoozed(now))
        };

        query = if filter.archived {
            query.filter(notification::Column::ArchivedAt.is_not_null())
        } else {
            query.filter(notification::Column::ArchivedAt.is_null())
        };

        query = match filter.read {
            Some(true) => query.filter(notification::Column::ReadAt.is_not_null()),
            Some(false) => query.filter(notification::Column::ReadAt.is_null()),
            None => query,
        };

        let models = query
            .order_by_desc(notification::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, RepositoryError> {
        notification::Entity::find_by_id(notification.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active = notification::ActiveModel::from(notification.clone());
        active.updated_at = Set(Utc::now().into());
        let model = active.update(self.db.as_ref()).await?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = notification::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn unread_count(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let count = Self::scoped(receiver_id, workspace_id)
            .filter(notification::Column::ReadAt.is_null())
            .filter(notification::Column::ArchivedAt.is_null())
            .filter(not_snoozed(now))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn mark_all_read(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let result = notification::Entity::update_many()
            .col_expr(
                notification::Column::ReadAt,
                Expr::value(Some(DateTimeWithTimeZone::from(now))),
            )
            .col_expr(
                notification::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(now)),
            )
            .filter(notification::Column::ReceiverId.eq(receiver_id))
            .filter(notification::Column::WorkspaceId.eq(workspace_id))
            .filter(notification::Column::ReadAt.is_null())
            .filter(notification::Column::ArchivedAt.is_null())
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }

    async fn find_preference(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, RepositoryError> {
        let model = user_notification_preference::Entity::find()
            .filter(user_notification_preference::Column::UserId.eq(user_id))
            .filter(user_notification_preference::Column::WorkspaceId.is_null())
            .filter(user_notification_preference::Column::ProjectId.is_null())
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save_preference(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, RepositoryError> {
        let existing = user_notification_preference::Entity::find_by_id(preference.id)
            .one(self.db.as_ref())
            .await?;

        let active = user_notification_preference::ActiveModel {
            id: Set(preference.id),
            user_id: Set(preference.user_id),
            workspace_id: Set(preference.workspace_id),
            project_id: Set(preference.project_id),
            property_change: Set(preference.property_change),
            state_change: Set(preference.state_change),
            comment: Set(preference.comment),
            mention: Set(preference.mention),
            issue_completed: Set(preference.issue_completed),
            created_by_id: Set(Some(preference.user_id)),
            updated_by_id: Set(Some(preference.user_id)),
            created_at: Set(preference.created_at.into()),
            updated_at: Set(preference.updated_at.into()),
        };

        let model = match existing {
            Some(_) => active.update(self.db.as_ref()).await?,
            None => active.insert(self.db.as_ref()).await?,
        };
        Ok(model.into())
    }

    async fn create_email_log(
        &self,
        log: &EmailNotificationLog,
    ) -> Result<EmailNotificationLog, RepositoryError> {
        let now = Utc::now();
        let model = email_notification_log::ActiveModel {
            id: Set(log.id),
            receiver_id: Set(log.receiver_id),
            triggered_by_id: Set(log.triggered_by_id),
            entity_identifier: Set(log.entity_identifier),
            entity_name: Set(log.entity_name.clone()),
            data: Set(log.data.clone()),
            processed_at: Set(log.processed_at.map(Into::into)),
            sent_at: Set(log.sent_at.map(Into::into)),
            entity: Set(log.entity.clone()),
            old_value: Set(log.old_value.clone()),
            new_value: Set(log.new_value.clone()),
            created_by_id: Set(Some(log.triggered_by_id)),
            updated_by_id: Set(Some(log.triggered_by_id)),
            created_at: Set(log.created_at.into()),
            updated_at: Set(now.into()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn pending_email_logs(
        &self,
        limit: u64,
    ) -> Result<Vec<EmailNotificationLog>, RepositoryError> {
        let models = email_notification_log::Entity::find()
            .filter(email_notification_log::Column::ProcessedAt.is_null())
            .order_by_asc(email_notification_log::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn mark_email_logs(
        &self,
        ids: &[Uuid],
        processed_at: DateTime<Utc>,
        sent: bool,
    ) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let at = DateTimeWithTimeZone::from(processed_at);
        let mut update = email_notification_log::Entity::update_many()
            .col_expr(
                email_notification_log::Column::ProcessedAt,
                Expr::value(Some(at)),
            )
            .col_expr(email_notification_log::Column::UpdatedAt, Expr::value(at));
        if sent {
            update = update.col_expr(email_notification_log::Column::SentAt, Expr::value(Some(at)));
        }
        let result = update
            .filter(email_notification_log::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}

impl From<Notification> for notification::ActiveModel {
    fn from(n: Notification) -> Self {
        Self {
            id: Set(n.id),
            workspace_id: Set(n.workspace_id),
            project_id: Set(n.project_id),
            data: Set(n.data),
            entity_identifier: Set(n.entity_identifier),
            entity_name: Set(n.entity_name),
            title: Set(n.title),
            message: Set(n.message),
            message_html: Set(n.message_html),
            message_stripped: Set(n.message_stripped),
            sender: Set(n.sender),
            triggered_by_id: Set(n.triggered_by_id),
            receiver_id: Set(n.receiver_id),
            read_at: Set(n.read_at.map(Into::into)),
            snoozed_till: Set(n.snoozed_till.map(Into::into)),
            archived_at: Set(n.archived_at.map(Into::into)),
            created_by_id: Set(n.created_by_id),
            updated_by_id: Set(n.updated_by_id),
            created_at: Set(n.created_at.into()),
            updated_at: Set(n.updated_at.into()),
        }
    }
}

impl From<notification::Model> for Notification {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            workspace_id: model.workspace_id,
            project_id: model.project_id,
            data: model.data,
            entity_identifier: model.entity_identifier,
            entity_name: model.entity_name,
            title: model.title,
            message: model.message,
            message_html: model.message_html,
            message_stripped: model.message_stripped,
            sender: model.sender,
            triggered_by_id: model.triggered_by_id,
            receiver_id: model.receiver_id,
            read_at: model.read_at.map(Into::into),
            snoozed_till: model.snoozed_till.map(Into::into),
            archived_at: model.archived_at.map(Into::into),
            created_by_id: model.created_by_id,
            updated_by_id: model.updated_by_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<user_notification_preference::Model> for NotificationPreference {
    fn from(model: user_notification_preference::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            workspace_id: model.workspace_id,
            project_id: model.project_id,
            property_change: model.property_change,
            state_change: model.state_change,
            comment: model.comment,
            mention: model.mention,
            issue_completed: model.issue_completed,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<email_notification_log::Model> for EmailNotificationLog {
    fn from(model: email_notification_log::Model) -> Self {
        Self {
            id: model.id,
            receiver_id: model.receiver_id,
            triggered_by_id: model.triggered_by_id,
            entity_identifier: model.entity_identifier,
            entity_name: model.entity_name,
            entity: model.entity,
            data: model.data,
            old_value: model.old_value,
            new_value: model.new_value,
            processed_at: model.processed_at.map(Into::into),
            sent_at: model.sent_at.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

#[cfg(test)]
#[path = "notification_repo_impl_test.rs"]
mod tests;
