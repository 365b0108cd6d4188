// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::subscription::{Subscription, SubscriptionWebhookEvent};
use async_trait::async_trait;
use uuid::Uuid;

/// 订阅仓库特质
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// 工作空间当前有效的订阅
    async fn find_active_for_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Option<Subscription>, RepositoryError>;
    /// 根据计费平台的订阅ID查找
    async fn find_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, RepositoryError>;
    /// 创建订阅
    async fn create(&self, subscription: &Subscription) -> Result<Subscription, RepositoryError>;
    /// 设置订阅激活状态，返回受影响行数
    async fn set_active(&self, subscription_id: &str, active: bool)
        -> Result<u64, RepositoryError>;
    /// 事件是否已处理
    async fn event_exists(&self, event_id: &str) -> Result<bool, RepositoryError>;
    /// 记录已处理事件，重复返回 [`RepositoryError::Conflict`]
    async fn record_event(&self, event: &SubscriptionWebhookEvent) -> Result<(), RepositoryError>;
}
