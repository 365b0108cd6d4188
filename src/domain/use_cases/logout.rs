// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::errors::RepositoryError;
use crate::domain::services::token_service::{expires_at, TokenError, TokenService};
use std::sync::Arc;
use thiserror::Error;

/// 登录态相关用例的错误
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 注销：将刷新令牌加入黑名单
pub struct LogoutUseCase<R: AccountRepository> {
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: AccountRepository> LogoutUseCase<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, refresh: &str) -> Result<(), AuthError> {
        let claims = self.tokens.verify_refresh(refresh)?;
        match self
            .repo
            .blacklist_token(claims.jti, claims.sub, expires_at(&claims))
            .await
        {
            Ok(()) => Ok(()),
            Err(RepositoryError::Conflict(_)) => Err(TokenError::Blacklisted.into()),
            Err(e) => Err(e.into()),
        }
    }
}
