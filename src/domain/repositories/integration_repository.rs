// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::integration::{
    DisabledUserIntegrationEvent, Integration, IntegrationEvent, NewUserIntegration,
    UserIntegration,
};
use async_trait::async_trait;
use uuid::Uuid;

/// 集成仓库特质
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// 所有集成，按名称排序
    async fn list_integrations(&self) -> Result<Vec<Integration>, RepositoryError>;
    /// 根据名称查找集成
    async fn find_integration_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Integration>, RepositoryError>;
    /// 创建集成
    async fn create_integration(
        &self,
        integration: &Integration,
    ) -> Result<Integration, RepositoryError>;
    /// 插入用户集成，唯一键冲突时更新元数据与显示名
    async fn upsert_user_integration(
        &self,
        input: &NewUserIntegration,
    ) -> Result<UserIntegration, RepositoryError>;
    /// 根据ID查找用户集成
    async fn find_user_integration(
        &self,
        id: Uuid,
    ) -> Result<Option<UserIntegration>, RepositoryError>;
    /// 查找某个集成下指定账户的用户集成
    async fn find_user_integration_by_account(
        &self,
        integration_id: Uuid,
        account_id: &str,
    ) -> Result<Option<UserIntegration>, RepositoryError>;
    /// 用户未撤销的集成
    async fn list_user_integrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserIntegration>, RepositoryError>;
    /// 撤销用户集成
    async fn revoke_user_integration(&self, user_id: Uuid, id: Uuid)
        -> Result<(), RepositoryError>;
    /// 创建集成事件
    async fn create_event(&self, event: &IntegrationEvent)
        -> Result<IntegrationEvent, RepositoryError>;
    /// 某个集成的事件
    async fn list_events(&self, integration_id: Uuid)
        -> Result<Vec<IntegrationEvent>, RepositoryError>;
    /// 关闭用户集成的某个事件，已关闭时更新动作列表
    async fn disable_event(
        &self,
        user_integration_id: Uuid,
        integration_event_id: Uuid,
        actions: serde_json::Value,
    ) -> Result<DisabledUserIntegrationEvent, RepositoryError>;
    /// 重新开启事件
    async fn enable_event(
        &self,
        user_integration_id: Uuid,
        integration_event_id: Uuid,
    ) -> Result<(), RepositoryError>;
}
