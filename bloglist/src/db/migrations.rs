// データベース初期化とマイグレーション実行

use crate::common::error::BlogError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

/// 書き込み競合時の待機時間
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite://bloglist.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(BlogError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, BlogError> {
    // データベースファイルが存在しない場合は作成
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| BlogError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| BlogError::Database(format!("Failed to create database: {}", e)))?;
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| BlogError::Database(format!("Invalid database URL: {}", e)))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|e| BlogError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), BlogError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| BlogError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// 全ユーザーと全ブログを単一トランザクションで削除
///
/// テスト分離専用。本番環境では呼び出し側で無効化すること。
pub async fn reset_all(pool: &SqlitePool) -> Result<(u64, u64), BlogError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| BlogError::Database(format!("Failed to begin reset: {}", e)))?;

    let blogs = crate::db::blogs::delete_all(&mut tx).await?;
    let users = crate::db::users::delete_all(&mut tx).await?;

    tx.commit()
        .await
        .map_err(|e| BlogError::Database(format!("Failed to commit reset: {}", e)))?;

    Ok((users, blogs))
}
