// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括部署环境、数据库、令牌、第三方服务等配置
pub mod settings;

#[cfg(test)]
mod settings_test;
