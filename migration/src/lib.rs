// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_accounts;
mod m20240101_000002_create_integrations;
mod m20240101_000003_create_notifications;
mod m20240101_000004_create_inbox;
mod m20240101_000005_create_billing;
mod m20240101_000006_create_documents;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    ///
    /// # 返回值
    ///
    /// 返回迁移列表，按依赖顺序排列
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_accounts::Migration),
            Box::new(m20240101_000002_create_integrations::Migration),
            Box::new(m20240101_000003_create_notifications::Migration),
            Box::new(m20240101_000004_create_inbox::Migration),
            Box::new(m20240101_000005_create_billing::Migration),
            Box::new(m20240101_000006_create_documents::Migration),
        ]
    }
}
