// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use migration::{Migrator, MigratorTrait};
use servcy::config::settings::Settings;
use servcy::infrastructure::database::connection;
use servcy::infrastructure::metrics::init_metrics;
use servcy::infrastructure::services::sendgrid_email::SendGridEmailSender;
use servcy::presentation::routes::{self, AppState};
use servcy::utils::telemetry;
use servcy::workers::email_digest_worker::EmailDigestWorker;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(!settings.is_debug());
    info!(host_type = ?settings.main.host_type, "Starting servcy...");

    // 3. Monitoring is only wired outside development
    if !settings.is_debug() {
        init_metrics(&settings.metrics.listen);
    }

    // 4. Connect to database
    let db = connection::create_pool(&settings.database, settings.is_debug()).await?;
    let db = Arc::new(db);

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 5. Initialize components
    let state = AppState::new(db.clone(), settings.clone());

    // 6. Start workers
    if settings.email_digest.enabled {
        let worker = EmailDigestWorker::new(
            state.notifications.clone(),
            state.accounts.clone(),
            Arc::new(SendGridEmailSender::new(settings.sendgrid.clone())),
            Duration::from_secs(settings.email_digest.interval_secs.max(1)),
            settings.email_digest.batch_size,
            settings.main.frontend_url.clone(),
        );
        worker.start();
    }

    // 7. Start HTTP server
    let app = routes::routes(state);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received ctrl+C signal, shutting down");
}
