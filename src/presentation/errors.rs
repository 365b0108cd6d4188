// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::repositories::errors::RepositoryError;
use crate::domain::services::billing_service::BillingError;
use crate::domain::services::token_service::TokenError;
use crate::domain::use_cases::logout::AuthError;

/// 服务器内部错误时返回给客户端的固定提示
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later!";

/// 带有明确状态码的请求错误
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 响应体统一为 `{"detail": "..."}`
#[derive(Debug)]
pub struct AppError(anyhow::Error);

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<ApiError>() {
            return err.status();
        }
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(err);
        }
        if self.0.downcast_ref::<TokenError>().is_some() {
            return StatusCode::UNAUTHORIZED;
        }
        if let Some(err) = self.0.downcast_ref::<AuthError>() {
            return match err {
                AuthError::Token(_) => StatusCode::UNAUTHORIZED,
                AuthError::Repository(e) => repository_status(e),
            };
        }
        if let Some(err) = self.0.downcast_ref::<BillingError>() {
            return match err {
                BillingError::MalformedEvent(_) => StatusCode::BAD_REQUEST,
                BillingError::Repository(e) => repository_status(e),
            };
        }
        if self.0.downcast_ref::<validator::ValidationErrors>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            tracing::debug!(error = %self.0, %status, "Request rejected");
            self.0.to_string()
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
