// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域用例模块
///
/// - 注销（logout）：将刷新令牌加入黑名单
/// - 刷新令牌（refresh_token）：校验并轮换刷新令牌
pub mod logout;
pub mod refresh_token;
