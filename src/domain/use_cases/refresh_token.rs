// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::logout::AuthError;
use crate::domain::models::token::TokenPair;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::services::token_service::{expires_at, TokenError, TokenService};
use std::sync::Arc;

/// 使用刷新令牌换取新的访问令牌
///
/// 开启轮换时旧刷新令牌进入黑名单并签发新的一对
pub struct RefreshTokenUseCase<R: AccountRepository> {
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: AccountRepository> RefreshTokenUseCase<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, refresh: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.verify_refresh(refresh)?;
        if self.repo.is_blacklisted(claims.jti).await? {
            return Err(TokenError::Blacklisted.into());
        }

        if !self.tokens.rotates_refresh_tokens() {
            return Ok(TokenPair {
                access: self.tokens.issue_access(claims.sub)?,
                refresh: refresh.to_string(),
            });
        }

        match self
            .repo
            .blacklist_token(claims.jti, claims.sub, expires_at(&claims))
            .await
        {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(TokenError::Blacklisted.into()),
            Err(e) => return Err(e.into()),
        }
        Ok(self.tokens.issue_pair(claims.sub)?)
    }
}
