// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::token::TokenPair;
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::services::token_service::TokenService;
use crate::domain::use_cases::logout::LogoutUseCase;
use crate::domain::use_cases::refresh_token::RefreshTokenUseCase;
use crate::presentation::errors::AppError;
use crate::presentation::responses::success_message;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RefreshPayload {
    pub refresh: String,
}

/// 注销
///
/// 成功返回 205，任何失败（缺少字段、令牌无效、已在黑名单）都返回 500
pub async fn logout<R: AccountRepository>(
    Extension(accounts): Extension<Arc<R>>,
    Extension(tokens): Extension<Arc<TokenService>>,
    payload: Result<Json<RefreshPayload>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(payload)) => LogoutUseCase::new(accounts, tokens)
            .execute(&payload.refresh)
            .await
            .map_err(anyhow::Error::from),
        Err(rejection) => Err(anyhow::anyhow!(rejection.body_text())),
    };

    match result {
        Ok(()) => (StatusCode::RESET_CONTENT, success_message("Success!")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "An error occurred while logging out.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "An error occurred while logging out!" })),
            )
                .into_response()
        }
    }
}

pub async fn refresh_token<R: AccountRepository>(
    Extension(accounts): Extension<Arc<R>>,
    Extension(tokens): Extension<Arc<TokenService>>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = RefreshTokenUseCase::new(accounts, tokens)
        .execute(&payload.refresh)
        .await?;
    Ok(Json(pair))
}
