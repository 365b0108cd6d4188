// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::notification::{
    EmailNotificationLog, Notification, NotificationFilter, NotificationPreference,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 通知仓库特质
///
/// 所有查询都限定在接收者与工作空间之内
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// 创建通知
    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError>;
    /// 查找属于接收者的通知
    async fn find_for_receiver(
        &self,
        id: Uuid,
        receiver_id: Uuid,
        workspace_id: Uuid,
    ) -> Result<Option<Notification>, RepositoryError>;
    /// 按过滤条件列出通知，最新的在前
    async fn list(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        filter: NotificationFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, RepositoryError>;
    /// 更新通知
    async fn update(&self, notification: &Notification) -> Result<Notification, RepositoryError>;
    /// 删除通知
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 未读、未归档且不在暂停期内的通知数量
    async fn unread_count(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError>;
    /// 将所有未读且未归档的通知标记为已读，返回受影响行数
    async fn mark_all_read(
        &self,
        receiver_id: Uuid,
        workspace_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, RepositoryError>;

    /// 查找用户的全局通知偏好
    async fn find_preference(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, RepositoryError>;
    /// 保存通知偏好（不存在则插入）
    async fn save_preference(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, RepositoryError>;

    /// 追加邮件通知日志
    async fn create_email_log(
        &self,
        log: &EmailNotificationLog,
    ) -> Result<EmailNotificationLog, RepositoryError>;
    /// 尚未处理的邮件通知日志，按创建时间升序
    async fn pending_email_logs(
        &self,
        limit: u64,
    ) -> Result<Vec<EmailNotificationLog>, RepositoryError>;
    /// 标记邮件日志已处理，`sent` 为真时同时记录发送时间
    async fn mark_email_logs(
        &self,
        ids: &[Uuid],
        processed_at: DateTime<Utc>,
        sent: bool,
    ) -> Result<u64, RepositoryError>;
}
