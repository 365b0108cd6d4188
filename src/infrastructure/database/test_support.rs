// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 单元测试共用的内存数据库与种子数据

use crate::domain::models::account::{User, Workspace};
use crate::domain::models::integration::{Integration, NewUserIntegration, UserIntegration};
use crate::domain::repositories::account_repository::AccountRepository;
use crate::domain::repositories::integration_repository::IntegrationRepository;
use crate::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use crate::infrastructure::repositories::integration_repo_impl::IntegrationRepositoryImpl;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use uuid::Uuid;

pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None).await.unwrap();
    db
}

pub async fn seed_user(db: &Arc<DatabaseConnection>, email: &str) -> User {
    AccountRepositoryImpl::new(db.clone())
        .create_user(&User::new(email))
        .await
        .unwrap()
}

/// 创建工作空间，所有者自动成为成员
pub async fn seed_workspace(db: &Arc<DatabaseConnection>, slug: &str, owner_id: Uuid) -> Workspace {
    AccountRepositoryImpl::new(db.clone())
        .create_workspace(&Workspace::new(slug.to_uppercase(), slug, owner_id))
        .await
        .unwrap()
}

pub async fn seed_integration(db: &Arc<DatabaseConnection>, name: &str) -> Integration {
    IntegrationRepositoryImpl::new(db.clone())
        .create_integration(&Integration {
            id: Uuid::new_v4(),
            name: name.to_string(),
            logo: None,
            description: format!("{} integration", name),
            configure_at: None,
        })
        .await
        .unwrap()
}

pub async fn seed_user_integration(
    db: &Arc<DatabaseConnection>,
    user_id: Uuid,
    integration_id: Uuid,
    account_id: &str,
) -> UserIntegration {
    IntegrationRepositoryImpl::new(db.clone())
        .upsert_user_integration(&NewUserIntegration {
            user_id,
            integration_id,
            account_id: account_id.to_string(),
            account_display_name: account_id.to_string(),
            meta_data: None,
            configuration: None,
        })
        .await
        .unwrap()
}
