// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::account::{MemberRole, User, Workspace};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 账户仓库特质
///
/// 覆盖用户、工作空间成员关系以及令牌黑名单
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 创建用户
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError>;
    /// 根据ID查找用户
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 批量查找用户
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, RepositoryError>;
    /// 创建工作空间，所有者自动成为管理员
    async fn create_workspace(&self, workspace: &Workspace) -> Result<Workspace, RepositoryError>;
    /// 根据 slug 查找工作空间
    async fn find_workspace_by_slug(&self, slug: &str)
        -> Result<Option<Workspace>, RepositoryError>;
    /// 添加工作空间成员
    async fn add_member(
        &self,
        workspace_id: Uuid,
        member_id: Uuid,
        role: MemberRole,
    ) -> Result<(), RepositoryError>;
    /// 用户是否为工作空间成员
    async fn is_member(&self, workspace_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError>;
    /// 将令牌加入黑名单，重复加入返回 [`RepositoryError::Conflict`]
    async fn blacklist_token(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    /// 令牌是否已在黑名单中
    async fn is_blacklisted(&self, jti: Uuid) -> Result<bool, RepositoryError>;
}
