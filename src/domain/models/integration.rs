// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outlook 集成在 `integration` 表中的名称
pub const OUTLOOK: &str = "Outlook";

/// 第三方集成定义
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Integration {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub description: String,
    pub configure_at: Option<String>,
}

/// 用户连接的第三方账户
///
/// `(user_id, integration_id, account_id)` 唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIntegration {
    pub id: Uuid,
    pub account_id: String,
    pub account_display_name: String,
    pub user_id: Uuid,
    pub integration_id: Uuid,
    /// 凭据等原始数据，不对外输出
    #[serde(skip_serializing)]
    pub meta_data: Option<String>,
    pub configuration: Option<serde_json::Value>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建或更新用户集成的输入
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserIntegration {
    pub user_id: Uuid,
    pub integration_id: Uuid,
    pub account_id: String,
    pub account_display_name: String,
    pub meta_data: Option<String>,
    pub configuration: Option<serde_json::Value>,
}

/// 集成可产生的事件类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrationEvent {
    pub id: Uuid,
    pub integration_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// 用户针对某个集成关闭的事件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisabledUserIntegrationEvent {
    pub id: Uuid,
    pub user_integration_id: Uuid,
    pub integration_event_id: Uuid,
    pub actions: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
