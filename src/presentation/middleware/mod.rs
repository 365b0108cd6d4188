// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 请求标识、认证与指标采集
pub mod auth_middleware;
pub mod metrics_middleware;
pub mod request_identity;
