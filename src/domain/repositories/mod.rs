// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义数据持久化的抽象契约，具体实现由基础设施层提供。
pub mod account_repository;
pub mod document_repository;
pub mod errors;
pub mod inbox_repository;
pub mod integration_repository;
pub mod notification_repository;
pub mod subscription_repository;
