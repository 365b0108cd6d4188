// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 收件箱条目状态
///
/// 以整数 `-2..=2` 存储和传输，状态之间没有迁移约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum InboxStatus {
    #[default]
    Pending,
    Rejected,
    Snoozed,
    Accepted,
    Duplicate,
}

impl InboxStatus {
    pub fn code(self) -> i16 {
        match self {
            InboxStatus::Pending => -2,
            InboxStatus::Rejected => -1,
            InboxStatus::Snoozed => 0,
            InboxStatus::Accepted => 1,
            InboxStatus::Duplicate => 2,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            -2 => Some(InboxStatus::Pending),
            -1 => Some(InboxStatus::Rejected),
            0 => Some(InboxStatus::Snoozed),
            1 => Some(InboxStatus::Accepted),
            2 => Some(InboxStatus::Duplicate),
            _ => None,
        }
    }
}

impl From<InboxStatus> for i16 {
    fn from(status: InboxStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i16> for InboxStatus {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        InboxStatus::from_code(code).ok_or_else(|| format!("invalid inbox status {}", code))
    }
}

/// 收件箱条目
///
/// 来自第三方集成（邮件、任务、评论等）的消息，
/// 以 `(uid, user_integration_id)` 唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboxItem {
    pub id: Uuid,
    pub uid: String,
    pub title: String,
    pub body: Option<String>,
    pub is_archived: bool,
    pub is_read: bool,
    pub cause: Option<String>,
    pub is_body_html: bool,
    pub user_integration_id: Uuid,
    pub category: Option<String>,
    pub i_am_mentioned: bool,
    pub attachments: Option<serde_json::Value>,
    pub status: InboxStatus,
    pub snoozed_till: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新增收件箱条目的输入
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewInboxItem {
    pub uid: String,
    pub title: String,
    pub body: Option<String>,
    pub cause: Option<String>,
    #[serde(default)]
    pub is_body_html: bool,
    pub user_integration_id: Uuid,
    pub category: Option<String>,
    #[serde(default)]
    pub i_am_mentioned: bool,
    pub attachments: Option<serde_json::Value>,
}

/// 收件箱分页查询
///
/// 由处理器从请求体构造，`page_size` 的上限在处理器中收敛
#[derive(Debug, Clone, PartialEq)]
pub struct InboxQuery {
    pub is_archived: bool,
    pub is_read: Option<bool>,
    pub category: Option<String>,
    pub status: Option<InboxStatus>,
    /// 集成名称，例如 `Gmail`
    pub source: Option<String>,
    pub search: Option<String>,
    pub page: u64,
    pub page_size: u64,
}

impl Default for InboxQuery {
    fn default() -> Self {
        Self {
            is_archived: false,
            is_read: None,
            category: None,
            status: None,
            source: None,
            search: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize)]
pub struct InboxPage {
    pub items: Vec<InboxItem>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}
