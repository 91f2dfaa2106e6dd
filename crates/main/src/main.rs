//! 主应用程序入口
//!
//! 启动 Axum Web API 服务。

use std::sync::Arc;

use application::services::{
    DiaryService, DiaryServiceDependencies, NotificationService,
    NotificationServiceDependencies, UserService, UserServiceDependencies,
};
use config::AppConfig;
use infrastructure::{
    create_pg_pool, BcryptPasswordHasher, NotificationHub, PgLinkRepository,
    PgNoteRepository, PgNotificationRepository, PgUserRepository,
};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env_with_defaults();
    config.validate()?;

    tracing::info!(
        "connecting to database: {}",
        config.database.url.split('@').next_back().unwrap_or("unknown")
    );

    let pg_pool = create_pg_pool(&config.database.url, config.database.max_connections).await?;

    // 运行迁移
    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    let user_repository = Arc::new(PgUserRepository::new(pg_pool.clone()));
    let link_repository = Arc::new(PgLinkRepository::new(pg_pool.clone()));
    let note_repository = Arc::new(PgNoteRepository::new(pg_pool.clone()));
    let notification_repository = Arc::new(PgNotificationRepository::new(pg_pool));

    let password_hasher = Arc::new(BcryptPasswordHasher::new(config.server.bcrypt_cost));
    let hub = Arc::new(NotificationHub::new());

    let notification_service = Arc::new(NotificationService::new(NotificationServiceDependencies {
        notification_repository,
        pusher: hub.clone(),
    }));

    let user_service = Arc::new(UserService::new(UserServiceDependencies {
        user_repository: user_repository.clone(),
        password_hasher,
    }));

    let diary_service = Arc::new(DiaryService::new(DiaryServiceDependencies {
        link_repository,
        note_repository,
        user_repository,
        notifications: notification_service.clone(),
    }));

    let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

    let state = AppState::new(
        user_service,
        diary_service,
        notification_service,
        hub,
        jwt_service,
    );

    let app = router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("painaway server listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown signal handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
