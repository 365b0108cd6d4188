// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::{
    truncate_change_value, ActivityKind, EmailNotificationLog, Notification,
    NotificationPreference,
};
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::repositories::notification_repository::NotificationRepository;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

const SENDER_SUBSCRIBED: &str = "in_app:issue_activities:subscribed";
const SENDER_MENTIONED: &str = "in_app:issue_activities:mentioned";

/// 一次实体变更活动
#[derive(Debug, Clone)]
pub struct Activity {
    pub workspace_id: Uuid,
    pub project_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub entity_name: String,
    pub entity_identifier: Option<i64>,
    pub title: String,
    /// 被修改的字段，例如 `state`、`comment`、`mention`
    pub field: String,
    pub verb: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        ActivityKind::from_field(&self.field)
    }

    fn payload(&self) -> serde_json::Value {
        json!({
            "entity": {
                "name": self.entity_name,
                "identifier": self.entity_identifier,
                "project_id": self.project_id,
            },
            "activity": {
                "verb": self.verb,
                "field": self.field,
                "actor": self.actor_id,
                "old_value": self.old_value,
                "new_value": self.new_value,
            },
        })
    }
}

/// 通知分发服务
///
/// 为每个接收者创建站内通知，并在偏好允许时追加邮件通知日志
pub struct NotificationService<R: NotificationRepository> {
    repo: Arc<R>,
}

impl<R: NotificationRepository> NotificationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 分发一次活动
    ///
    /// 活动发起者本人不会收到通知，描述字段的修改不产生通知
    pub async fn notify(
        &self,
        activity: &Activity,
        receivers: &[Uuid],
    ) -> Result<Vec<Notification>, RepositoryError> {
        if activity.field == "description" {
            return Ok(Vec::new());
        }

        let kind = activity.kind();
        let sender = match kind {
            ActivityKind::Mention => SENDER_MENTIONED,
            _ => SENDER_SUBSCRIBED,
        };
        let payload = activity.payload();

        let mut seen = HashSet::new();
        let mut created = Vec::new();
        for receiver_id in receivers.iter().copied() {
            if receiver_id == activity.actor_id || !seen.insert(receiver_id) {
                continue;
            }

            let mut notification = Notification::new(
                activity.workspace_id,
                receiver_id,
                activity.entity_name.clone(),
                activity.title.clone(),
                sender,
            );
            notification.project_id = activity.project_id;
            notification.entity_identifier = activity.entity_identifier;
            notification.triggered_by_id = Some(activity.actor_id);
            notification.created_by_id = Some(activity.actor_id);
            notification.data = Some(payload.clone());
            created.push(self.repo.create(&notification).await?);

            let preference = self
                .repo
                .find_preference(receiver_id)
                .await?
                .unwrap_or_else(|| NotificationPreference::new(receiver_id));
            if !preference.allows(kind) {
                tracing::debug!(%receiver_id, ?kind, "Email notification disabled by preference");
                continue;
            }

            let mut log = EmailNotificationLog::new(
                receiver_id,
                activity.actor_id,
                activity.entity_name.clone(),
                truncate_change_value(&activity.field),
            )
            .with_change(activity.old_value.as_deref(), activity.new_value.as_deref());
            log.entity_identifier = activity.entity_identifier;
            log.data = Some(payload.clone());
            self.repo.create_email_log(&log).await?;
        }

        tracing::info!(
            entity = %activity.entity_name,
            field = %activity.field,
            notifications = created.len(),
            "Activity dispatched"
        );
        Ok(created)
    }
}
