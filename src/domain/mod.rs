// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 包含账户、通知、收件箱、计费、集成与文档的核心业务逻辑：
/// - 领域模型（models）：业务实体和数据结构
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：令牌、通知分发、计费与通信
/// - 用例（use_cases）：注销与令牌刷新
///
/// 领域层不依赖具体的存储与外部服务实现。
pub mod models;
pub mod repositories;
pub mod services;
pub mod use_cases;
