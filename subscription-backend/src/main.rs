// src/main.rs
use std::sync::Arc;
use subscription_backend::api::{app_router, AppState};
use subscription_backend::config::AppConfig;
use subscription_backend::db::{create_db_pool, subscriptions_table_exists};
use subscription_backend::logging::init_tracing;
use subscription_backend::repository::subscription_repository::SubscriptionRepository;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 設定を読み込む
    let app_config = AppConfig::from_env()?;

    // トレーシングの設定
    init_tracing(&app_config);

    tracing::info!("Starting Subscription Backend server...");
    tracing::info!(
        environment = %app_config.environment,
        server_addr = %app_config.server_addr(),
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    // テーブルはマイグレーション外で作成される前提
    if !subscriptions_table_exists(&db_pool).await? {
        tracing::warn!(
            "Table 'subscriptions' does not exist; requests will fail until it is created"
        );
    }

    // ストレージを注入してルーターを構築
    let storage = Arc::new(SubscriptionRepository::new(db_pool));
    let app_state = AppState::new(storage, &app_config);
    let app_router = app_router(app_state);

    let listener = TcpListener::bind(app_config.server_addr()).await?;
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr()
    );

    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
