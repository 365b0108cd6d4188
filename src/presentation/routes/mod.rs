// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::services::billing_service::BillingService;
use crate::domain::services::token_service::TokenService;
use crate::infrastructure::repositories::account_repo_impl::AccountRepositoryImpl;
use crate::infrastructure::repositories::document_repo_impl::DocumentRepositoryImpl;
use crate::infrastructure::repositories::inbox_repo_impl::InboxRepositoryImpl;
use crate::infrastructure::repositories::integration_repo_impl::IntegrationRepositoryImpl;
use crate::infrastructure::repositories::notification_repo_impl::NotificationRepositoryImpl;
use crate::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;
use crate::presentation::handlers::{
    auth_handler, billing_handler, document_handler, inbox_handler, integration_handler,
    notification_handler, webhook_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::presentation::middleware::metrics_middleware::metrics_middleware;
use crate::presentation::middleware::request_identity::request_identity_middleware;
use axum::{
    middleware,
    routing::{get, patch, post, put},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

type Accounts = AccountRepositoryImpl;
type Notifications = NotificationRepositoryImpl;
type Inbox = InboxRepositoryImpl;
type Integrations = IntegrationRepositoryImpl;
type Documents = DocumentRepositoryImpl;
type Subscriptions = SubscriptionRepositoryImpl;

/// 路由共享的服务与仓库
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<Accounts>,
    pub notifications: Arc<Notifications>,
    pub inbox: Arc<Inbox>,
    pub integrations: Arc<Integrations>,
    pub documents: Arc<Documents>,
    pub billing: Arc<BillingService<Subscriptions>>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, settings: Arc<Settings>) -> Self {
        let tokens = Arc::new(TokenService::new(&settings.main.secret_key, &settings.jwt));
        let billing = Arc::new(BillingService::new(
            Arc::new(SubscriptionRepositoryImpl::new(db.clone())),
            settings.paddle.plus_price_id.clone(),
        ));

        Self {
            tokens,
            accounts: Arc::new(AccountRepositoryImpl::new(db.clone())),
            notifications: Arc::new(NotificationRepositoryImpl::new(db.clone())),
            inbox: Arc::new(InboxRepositoryImpl::new(db.clone())),
            integrations: Arc::new(IntegrationRepositoryImpl::new(db.clone())),
            documents: Arc::new(DocumentRepositoryImpl::new(db)),
            billing,
            settings,
        }
    }
}

fn webhook_routes() -> Router {
    Router::new()
        .route(
            "/paddle",
            post(billing_handler::paddle_webhook::<Subscriptions>),
        )
        .route("/razorpay", post(billing_handler::razorpay_webhook))
        .route("/jira", post(billing_handler::jira_webhook))
        .route("/asana/{user_integration_id}", post(webhook_handler::asana))
        .route(
            "/microsoft",
            post(webhook_handler::microsoft::<Integrations, Inbox>),
        )
        .route("/figma", post(webhook_handler::figma))
        .route("/github", post(webhook_handler::github))
        .route("/slack", post(webhook_handler::slack))
        .route("/trello/{user_integration_id}", post(webhook_handler::trello))
        .route("/google", post(webhook_handler::google))
}

fn notification_routes() -> Router {
    use notification_handler::*;

    Router::new()
        .route("/", get(list_notifications::<Notifications, Accounts>))
        .route("/unread", get(unread_count::<Notifications, Accounts>))
        .route("/read", post(mark_all_read::<Notifications, Accounts>))
        .route(
            "/{id}",
            get(get_notification::<Notifications, Accounts>)
                .patch(update_notification::<Notifications, Accounts>)
                .delete(delete_notification::<Notifications, Accounts>),
        )
        .route(
            "/{id}/read",
            post(mark_read::<Notifications, Accounts>).delete(mark_unread::<Notifications, Accounts>),
        )
        .route(
            "/{id}/archive",
            post(archive::<Notifications, Accounts>).delete(unarchive::<Notifications, Accounts>),
        )
}

fn inbox_routes() -> Router {
    use inbox_handler::*;

    Router::new()
        .route("/fetch", post(fetch_items::<Inbox>))
        .route("/unread-count", get(unread_count::<Inbox>))
        .route("/read", post(read_item::<Inbox>))
        .route("/archive", post(archive_items::<Inbox>))
        .route("/delete", post(delete_items::<Inbox>))
        .route("/{id}/status", patch(update_status::<Inbox>))
}

fn integration_routes() -> Router {
    use integration_handler::*;

    Router::new()
        .route("/", get(list_integrations::<Integrations>))
        .route("/user-integration", get(list_user_integrations::<Integrations>))
        .route(
            "/user-integration/{id}",
            axum::routing::delete(revoke_user_integration::<Integrations>),
        )
        .route(
            "/user-integration/{id}/events/{event_id}",
            put(disable_event::<Integrations>).delete(enable_event::<Integrations>),
        )
        .route("/integration-event", get(list_events::<Integrations>))
        .route("/oauth/google", get(google_oauth_config))
}

fn document_routes() -> Router {
    use document_handler::*;

    Router::new()
        .route(
            "/",
            get(list_documents::<Documents>).post(create_document::<Documents, Accounts>),
        )
        .route(
            "/{id}",
            get(get_document::<Documents>).delete(delete_document::<Documents>),
        )
        .route("/{id}/restore", post(restore_document::<Documents>))
}

/// 创建应用路由
///
/// `/health`、`/v1/version`、注销、令牌刷新与各 Webhook 无需认证，
/// 其余路由要求有效的访问令牌。生产环境额外挂载指标中间件
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/logout", post(auth_handler::logout::<Accounts>))
        .route("/token/refresh", post(auth_handler::refresh_token::<Accounts>))
        .nest("/webhooks", webhook_routes());

    let protected_routes = Router::new()
        .nest(
            "/workspaces/{slug}/users/notifications",
            notification_routes(),
        )
        .route(
            "/workspaces/{slug}/subscription",
            get(billing_handler::get_subscription::<Subscriptions, Accounts>),
        )
        .route(
            "/users/me/notification-preferences",
            get(notification_handler::get_preferences::<Notifications>)
                .patch(notification_handler::update_preferences::<Notifications>),
        )
        .nest("/inbox", inbox_routes())
        .nest("/integrations", integration_routes())
        .nest("/documents", document_routes())
        .route_layer(middleware::from_fn_with_state(
            AuthState {
                tokens: state.tokens.clone(),
            },
            auth_middleware,
        ));

    let mut app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(state.settings.clone()))
        .layer(Extension(state.tokens))
        .layer(Extension(state.accounts))
        .layer(Extension(state.notifications))
        .layer(Extension(state.inbox))
        .layer(Extension(state.integrations))
        .layer(Extension(state.documents))
        .layer(Extension(state.billing));

    if !state.settings.is_debug() {
        app = app.layer(middleware::from_fn(metrics_middleware));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_identity_middleware))
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
