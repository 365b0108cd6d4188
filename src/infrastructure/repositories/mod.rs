// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的领域仓库接口实现
pub mod account_repo_impl;
pub mod document_repo_impl;
pub mod inbox_repo_impl;
pub mod integration_repo_impl;
pub mod notification_repo_impl;
pub mod subscription_repo_impl;
