// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 账户（account）：用户、工作空间与成员角色
/// - 令牌（token）：JWT 载荷与令牌对
/// - 通知（notification）：站内通知、通知偏好与邮件通知日志
/// - 收件箱（inbox）：来自第三方集成的消息
/// - 订阅（subscription）：工作空间的计费订阅
/// - 集成（integration）：第三方集成及用户连接的账户
/// - 文档（document）：用户上传或链接的文档
pub mod account;
pub mod document;
pub mod inbox;
pub mod integration;
pub mod notification;
pub mod subscription;
pub mod token;
