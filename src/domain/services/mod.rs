// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 计费服务（billing_service）：处理订阅事件和签名校验
/// - 通信（communication）：邮件与短信发送抽象
/// - 通知服务（notification_service）：分发站内通知与邮件通知日志
/// - 令牌服务（token_service）：签发与校验 JWT
pub mod billing_service;
pub mod communication;
pub mod notification_service;
pub mod token_service;
