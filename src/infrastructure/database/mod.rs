// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库模块
///
/// 提供数据库连接池和实体定义
pub mod connection;
pub mod entities;

#[cfg(test)]
pub mod test_support;
