// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::net::SocketAddr;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 本次请求的关联ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// 生成8位关联ID
pub fn new_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// 匿名请求者标识：`client-ip:user-agent` 的 SHA-256 前6位
pub fn requester_identity(client_ip: &str, user_agent: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", client_ip, user_agent).as_bytes());
    hex::encode(digest)[..6].to_string()
}

/// 客户端地址，优先取 `X-Forwarded-For` 的第一项
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "-".to_string())
}

/// 请求标识中间件
///
/// 为每个请求生成关联ID并计算请求者标识，后续处理都运行在
/// 携带这两个字段的 `request` span 中。认证中间件会用用户ID
/// 覆盖 `user_identity`
pub async fn request_identity_middleware(mut req: Request, next: Next) -> Response {
    let request_id = new_request_id();

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let identity = requester_identity(&client_ip(req.headers(), peer), user_agent);

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        user_identity = %identity,
        method = %req.method(),
        path = %req.uri().path(),
    );

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
