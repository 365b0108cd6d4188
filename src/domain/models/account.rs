// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 创建一个新用户
    ///
    /// 显示名称默认取邮箱的本地部分
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        let display_name = email.split('@').next().unwrap_or_default().to_string();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name: None,
            last_name: None,
            display_name,
            phone_number: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 用于邮件收件人的姓名，姓和名都为空时返回 `None`
    pub fn full_name(&self) -> Option<String> {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// 工作空间实体
///
/// 多租户的顶层分组，通过 slug 在 URL 中定位
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            name: name.into(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 工作空间成员角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Guest,
    Viewer,
    Member,
    Admin,
}

impl MemberRole {
    pub fn code(self) -> i16 {
        match self {
            MemberRole::Guest => 5,
            MemberRole::Viewer => 10,
            MemberRole::Member => 15,
            MemberRole::Admin => 20,
        }
    }

    pub fn from_code(code: i16) -> Self {
        match code {
            i16::MIN..=5 => MemberRole::Guest,
            6..=10 => MemberRole::Viewer,
            11..=15 => MemberRole::Member,
            _ => MemberRole::Admin,
        }
    }
}
