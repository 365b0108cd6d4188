// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 与迁移中的表一一对应，使用 SeaORM 进行对象关系映射
pub mod blacklisted_token;
pub mod disabled_user_integration_event;
pub mod document;
pub mod email_notification_log;
pub mod inbox;
pub mod integration;
pub mod integration_event;
pub mod notification;
pub mod subscription;
pub mod subscription_webhook_event;
pub mod user;
pub mod user_integration;
pub mod user_notification_preference;
pub mod workspace;
pub mod workspace_member;
