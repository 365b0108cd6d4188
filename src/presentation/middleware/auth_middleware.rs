// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::token_service::TokenService;
use crate::presentation::extractors::auth_user::AuthUser;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <access>`，成功后写入 [`AuthUser`]
/// 并把当前 span 的 `user_identity` 替换为用户ID
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        Some(token) => token.trim().to_string(),
        None => return unauthorized("Authentication credentials were not provided."),
    };

    let claims = match state.tokens.verify_access(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected access token");
            return unauthorized("Given token not valid for any token type");
        }
    };

    tracing::Span::current().record("user_identity", tracing::field::display(claims.sub));
    req.extensions_mut().insert(AuthUser(claims.sub));
    next.run(req).await
}
