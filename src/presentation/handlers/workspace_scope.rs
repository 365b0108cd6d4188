// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::account::Workspace;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::presentation::errors::{ApiError, AppError};
use uuid::Uuid;

/// 根据 slug 解析工作空间并确认调用者是成员
///
/// 工作空间不存在返回 404，非成员返回 403
pub async fn member_workspace<A: AccountRepository>(
    accounts: &A,
    slug: &str,
    user_id: Uuid,
) -> Result<Workspace, AppError> {
    let workspace = accounts
        .find_workspace_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Workspace not found".to_string()))?;

    if !accounts.is_member(workspace.id, user_id).await? {
        tracing::warn!(%user_id, workspace = slug, "Rejected non-member");
        return Err(ApiError::Forbidden(
            "You are not a member of this workspace".to_string(),
        )
        .into());
    }
    Ok(workspace)
}
