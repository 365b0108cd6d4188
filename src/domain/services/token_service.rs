// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::JwtSettings;
use crate::domain::models::token::{Claims, TokenPair, TokenType};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

/// 令牌错误类型
#[derive(Error, Debug)]
pub enum TokenError {
    /// 签名或格式无效
    #[error("Token is invalid")]
    Invalid,
    /// 已过期
    #[error("Token has expired")]
    Expired,
    /// 令牌类型不匹配
    #[error("Expected a {0:?} token")]
    WrongType(TokenType),
    /// 已在黑名单中
    #[error("Token is blacklisted")]
    Blacklisted,
    /// 签发失败
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// JWT 签发与校验服务
///
/// 使用 HS256，密钥来自 `main.secret_key`
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    rotate_refresh_tokens: bool,
}

impl TokenService {
    pub fn new(secret: &str, settings: &JwtSettings) -> Self {
        Self::with_lifetimes(
            secret,
            Duration::minutes(settings.access_token_lifetime_minutes),
            Duration::days(settings.refresh_token_lifetime_days),
            settings.rotate_refresh_tokens,
        )
    }

    pub fn with_lifetimes(
        secret: &str,
        access_lifetime: Duration,
        refresh_lifetime: Duration,
        rotate_refresh_tokens: bool,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime,
            refresh_lifetime,
            rotate_refresh_tokens,
        }
    }

    /// 刷新时是否轮换刷新令牌
    pub fn rotates_refresh_tokens(&self) -> bool {
        self.rotate_refresh_tokens
    }

    /// 为用户签发一对新令牌
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.encode(user_id, TokenType::Access, self.access_lifetime)?,
            refresh: self.encode(user_id, TokenType::Refresh, self.refresh_lifetime)?,
        })
    }

    /// 只签发访问令牌
    pub fn issue_access(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.encode(user_id, TokenType::Access, self.access_lifetime)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenType::Access)
    }

    /// 校验刷新令牌的签名、有效期和类型，黑名单由调用方检查
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenType::Refresh)
    }

    fn encode(
        &self,
        user_id: Uuid,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            token_type,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;
        if data.claims.token_type != expected {
            return Err(TokenError::WrongType(expected));
        }
        Ok(data.claims)
    }
}

/// 令牌过期时间
pub fn expires_at(claims: &Claims) -> DateTime<Utc> {
    Utc.timestamp_opt(claims.exp, 0)
        .single()
        .unwrap_or_else(Utc::now)
}
