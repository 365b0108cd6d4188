// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::inbox::{InboxItem, InboxPage, InboxQuery, InboxStatus, NewInboxItem};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 收件箱仓库特质
///
/// 除 `add_item`/`add_items` 外，所有操作都只作用于
/// 属于 `user_id` 的用户集成下的条目
#[async_trait]
pub trait InboxRepository: Send + Sync {
    /// 按 `(uid, user_integration_id)` 获取或创建条目，返回条目和是否新建
    async fn add_item(&self, item: &NewInboxItem) -> Result<(InboxItem, bool), RepositoryError>;
    /// 批量添加，返回新建数量
    async fn add_items(&self, items: &[NewInboxItem]) -> Result<u64, RepositoryError>;
    /// 分页查询
    async fn list(&self, user_id: Uuid, query: &InboxQuery) -> Result<InboxPage, RepositoryError>;
    /// 标记单个条目已读
    async fn read_item(&self, user_id: Uuid, item_id: Uuid) -> Result<(), RepositoryError>;
    /// 归档条目，返回受影响行数
    async fn archive_items(&self, user_id: Uuid, item_ids: &[Uuid])
        -> Result<u64, RepositoryError>;
    /// 删除条目，返回受影响行数
    async fn delete_items(&self, user_id: Uuid, item_ids: &[Uuid]) -> Result<u64, RepositoryError>;
    /// 未读且未归档的条目数量
    async fn unread_count(&self, user_id: Uuid) -> Result<u64, RepositoryError>;
    /// 更新条目状态
    async fn update_status(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        status: InboxStatus,
        snoozed_till: Option<DateTime<Utc>>,
    ) -> Result<InboxItem, RepositoryError>;
}
