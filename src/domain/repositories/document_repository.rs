// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::errors::RepositoryError;
use crate::domain::models::document::Document;
use async_trait::async_trait;
use uuid::Uuid;

/// 文档仓库特质
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// 创建文档
    async fn create(&self, document: &Document) -> Result<Document, RepositoryError>;
    /// 用户创建的未删除文档，`search` 按名称不区分大小写匹配
    async fn list(&self, owner_id: Uuid, search: Option<&str>)
        -> Result<Vec<Document>, RepositoryError>;
    /// 查找用户创建的文档
    async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Document>, RepositoryError>;
    /// 设置删除标记
    async fn set_deleted(
        &self,
        owner_id: Uuid,
        id: Uuid,
        deleted: bool,
    ) -> Result<(), RepositoryError>;
}
