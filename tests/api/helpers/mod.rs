// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 端到端测试共用的应用构建与种子数据

use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use servcy::config::settings::Settings;
use servcy::domain::models::account::{User, Workspace};
use servcy::domain::models::integration::{Integration, NewUserIntegration, UserIntegration};
use servcy::domain::repositories::account_repository::AccountRepository;
use servcy::domain::repositories::integration_repository::IntegrationRepository;
use servcy::presentation::routes::{self, AppState};
use std::sync::Arc;
use uuid::Uuid;

pub const PADDLE_SECRET: &str = "pdl_ntfset_test_secret";
pub const PLUS_PRICE_ID: &str = "pri_plus_monthly";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn seed_user(&self, email: &str) -> User {
        self.state
            .accounts
            .create_user(&User::new(email))
            .await
            .expect("Failed to seed user")
    }

    /// 所有者自动成为成员
    pub async fn seed_workspace(&self, slug: &str, owner: &User) -> Workspace {
        self.state
            .accounts
            .create_workspace(&Workspace::new(slug.to_uppercase(), slug, owner.id))
            .await
            .expect("Failed to seed workspace")
    }

    /// 创建集成并把用户的外部账号关联上去
    pub async fn seed_user_integration(
        &self,
        user: &User,
        integration_name: &str,
        account_id: &str,
    ) -> UserIntegration {
        let integration = self
            .state
            .integrations
            .create_integration(&Integration {
                id: Uuid::new_v4(),
                name: integration_name.to_string(),
                logo: None,
                description: format!("{} integration", integration_name),
                configure_at: None,
            })
            .await
            .expect("Failed to seed integration");
        self.state
            .integrations
            .upsert_user_integration(&NewUserIntegration {
                user_id: user.id,
                integration_id: integration.id,
                account_id: account_id.to_string(),
                account_display_name: account_id.to_string(),
                meta_data: None,
                configuration: None,
            })
            .await
            .expect("Failed to seed user integration")
    }

    pub fn access_token(&self, user: &User) -> String {
        self.state
            .tokens
            .issue_access(user.id)
            .expect("Failed to issue access token")
    }

    pub fn bearer(&self, user: &User) -> String {
        format!("Bearer {}", self.access_token(user))
    }
}

pub fn test_settings() -> Settings {
    Settings::with_defaults()
        .and_then(|builder| builder.set_override("main.secret_key", "integration-test-secret"))
        .and_then(|builder| builder.set_override("paddle.webhook_secret", PADDLE_SECRET))
        .and_then(|builder| builder.set_override("paddle.plus_price_id", PLUS_PRICE_ID))
        .and_then(|builder| builder.build())
        .and_then(|config| config.try_deserialize())
        .expect("Failed to build test settings")
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(test_settings()).await
}

pub async fn create_test_app_with(settings: Settings) -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to sqlite");
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(db.clone(), Arc::new(settings));
    let server = TestServer::new(routes::routes(state.clone())).expect("Failed to create server");

    TestApp { server, state }
}
