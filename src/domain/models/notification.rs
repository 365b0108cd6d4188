// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 邮件通知日志中新旧值的最大长度
pub const MAX_CHANGE_VALUE_LEN: usize = 300;

/// 通知实体
///
/// 每个接收者在某个工作空间下的一条通知，
/// 通过 `read_at`、`archived_at`、`snoozed_till` 三个时间戳表达生命周期
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub project_id: Option<Uuid>,
    pub data: Option<serde_json::Value>,
    pub entity_identifier: Option<i64>,
    pub entity_name: String,
    pub title: String,
    pub message: Option<serde_json::Value>,
    pub message_html: String,
    pub message_stripped: Option<String>,
    pub sender: String,
    pub triggered_by_id: Option<Uuid>,
    pub receiver_id: Uuid,
    pub read_at: Option<DateTime<Utc>>,
    pub snoozed_till: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_by_id: Option<Uuid>,
    pub updated_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// 创建一条新通知
    pub fn new(
        workspace_id: Uuid,
        receiver_id: Uuid,
        entity_name: impl Into<String>,
        title: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            project_id: None,
            data: None,
            entity_identifier: None,
            entity_name: entity_name.into(),
            title: title.into(),
            message: None,
            message_html: "<p></p>".to_string(),
            message_stripped: None,
            sender: sender.into(),
            triggered_by_id: None,
            receiver_id,
            read_at: None,
            snoozed_till: None,
            archived_at: None,
            created_by_id: None,
            updated_by_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// 在给定时间点是否仍处于暂停状态
    pub fn is_snoozed_at(&self, now: DateTime<Utc>) -> bool {
        self.snoozed_till.is_some_and(|till| till > now)
    }
}

/// 通知列表过滤条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationFilter {
    /// `false` 时隐藏仍在暂停期内的通知，`true` 时只返回它们
    #[serde(default)]
    pub snoozed: bool,
    /// `false` 时只返回未归档通知，`true` 时只返回已归档通知
    #[serde(default)]
    pub archived: bool,
    /// 为空时不过滤已读状态
    pub read: Option<bool>,
}

/// 触发通知的活动类型，对应用户偏好中的开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PropertyChange,
    StateChange,
    IssueCompleted,
    Comment,
    Mention,
}

impl ActivityKind {
    /// 根据活动字段名推断类型
    pub fn from_field(field: &str) -> Self {
        match field {
            "state" => ActivityKind::StateChange,
            "completed" => ActivityKind::IssueCompleted,
            "comment" => ActivityKind::Comment,
            "mention" => ActivityKind::Mention,
            _ => ActivityKind::PropertyChange,
        }
    }
}

/// 用户通知偏好
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub property_change: bool,
    pub state_change: bool,
    pub comment: bool,
    pub mention: bool,
    pub issue_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationPreference {
    /// 所有开关默认开启
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            workspace_id: None,
            project_id: None,
            property_change: true,
            state_change: true,
            comment: true,
            mention: true,
            issue_completed: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 该偏好是否允许为此类活动发送邮件
    pub fn allows(&self, kind: ActivityKind) -> bool {
        match kind {
            ActivityKind::PropertyChange => self.property_change,
            ActivityKind::StateChange => self.state_change,
            ActivityKind::IssueCompleted => self.issue_completed,
            ActivityKind::Comment => self.comment,
            ActivityKind::Mention => self.mention,
        }
    }

    pub fn apply(&mut self, update: &PreferenceUpdate) {
        if let Some(v) = update.property_change {
            self.property_change = v;
        }
        if let Some(v) = update.state_change {
            self.state_change = v;
        }
        if let Some(v) = update.comment {
            self.comment = v;
        }
        if let Some(v) = update.mention {
            self.mention = v;
        }
        if let Some(v) = update.issue_completed {
            self.issue_completed = v;
        }
        self.updated_at = Utc::now();
    }
}

/// 偏好的部分更新
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceUpdate {
    pub property_change: Option<bool>,
    pub state_change: Option<bool>,
    pub comment: Option<bool>,
    pub mention: Option<bool>,
    pub issue_completed: Option<bool>,
}

/// 邮件通知日志
///
/// 记录需要通过邮件告知接收者的变更，由汇总工作器批量发送
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailNotificationLog {
    pub id: Uuid,
    pub receiver_id: Uuid,
    pub triggered_by_id: Uuid,
    pub entity_identifier: Option<i64>,
    pub entity_name: String,
    pub entity: String,
    pub data: Option<serde_json::Value>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EmailNotificationLog {
    pub fn new(
        receiver_id: Uuid,
        triggered_by_id: Uuid,
        entity_name: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            receiver_id,
            triggered_by_id,
            entity_identifier: None,
            entity_name: entity_name.into(),
            entity: entity.into(),
            data: None,
            old_value: None,
            new_value: None,
            processed_at: None,
            sent_at: None,
            created_at: Utc::now(),
        }
    }

    /// 设置新旧值，超出列宽的部分被截断
    pub fn with_change(mut self, old_value: Option<&str>, new_value: Option<&str>) -> Self {
        self.old_value = old_value.map(truncate_change_value);
        self.new_value = new_value.map(truncate_change_value);
        self
    }
}

/// 按字符截断到 [`MAX_CHANGE_VALUE_LEN`]
pub fn truncate_change_value(value: &str) -> String {
    value.chars().take(MAX_CHANGE_VALUE_LEN).collect()
}
