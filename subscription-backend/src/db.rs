// src/db.rs
use crate::config::AppConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub type DbPool = DatabaseConnection;

/// 接続プールを作成
pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database.url.clone());

    // 接続オプションを設定
    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(config.database.connect_timeout)
        .acquire_timeout(config.database.connect_timeout)
        .sqlx_logging(config.is_development());

    Database::connect(opt).await
}

/// subscriptions テーブルが存在するか確認するヘルパー関数
pub async fn subscriptions_table_exists(conn: &DbPool) -> Result<bool, DbErr> {
    let result_opt = conn
        .query_one(Statement::from_string(
            conn.get_database_backend(),
            "SELECT to_regclass('subscriptions') IS NOT NULL AS exists;".to_string(),
        ))
        .await?;

    // 結果が存在すれば処理、なければfalseを返す
    match result_opt {
        Some(result) => result.try_get("", "exists"),
        None => Ok(false),
    }
}
