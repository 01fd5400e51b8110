//! Bloglist
//!
//! ブログ共有アプリケーションのコア：アカウント管理、ブログ登録、
//! いいね集計、所有者のみの削除、いいね数順の一覧

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// 認証機能（パスワードハッシュ）
pub mod auth;

/// データベースアクセス
pub mod db;

/// アカウントディレクトリ
pub mod directory;

/// ブログレジストリ
pub mod registry;

/// いいね数順の並び替え
pub mod ordering;

/// 通知メッセージ
pub mod notice;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// CLIインターフェース
pub mod cli;

use common::error::{BlogError, BlogResult};
use directory::{AccountDirectory, CredentialPolicy};
use registry::BlogRegistry;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// アカウントディレクトリ
    pub directory: AccountDirectory,
    /// ブログレジストリ
    pub registry: BlogRegistry,
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// リセット操作の許可（テスト専用）
    pub test_mode: bool,
}

impl AppState {
    /// プールからアプリケーション状態を構築
    pub fn new(db_pool: sqlx::SqlitePool, credentials: CredentialPolicy, test_mode: bool) -> Self {
        let users: Arc<dyn db::traits::UserRepository> = Arc::new(db_pool.clone());
        let blogs: Arc<dyn db::traits::BlogRepository> = Arc::new(db_pool.clone());
        Self {
            directory: AccountDirectory::new(users, credentials),
            registry: BlogRegistry::new(blogs),
            db_pool,
            test_mode,
        }
    }

    /// 全ユーザーと全ブログを削除（テストモード時のみ）
    pub async fn reset(&self) -> BlogResult<()> {
        if !self.test_mode {
            tracing::warn!("Reset requested outside test mode");
            return Err(BlogError::Forbidden(
                "reset is only available in test mode".to_string(),
            ));
        }

        let (users, blogs) = db::migrations::reset_all(&self.db_pool).await?;
        tracing::info!(users, blogs, "All state reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::NewBlog;

    async fn state(test_mode: bool) -> AppState {
        let pool = db::test_utils::test_db_pool().await;
        let policy = CredentialPolicy {
            hash_cost: 4,
            ..CredentialPolicy::default()
        };
        AppState::new(pool, policy, test_mode)
    }

    #[tokio::test]
    async fn test_reset_clears_users_and_blogs() {
        let state = state(true).await;
        let user = state
            .directory
            .register("inkinvissible", "Matti Luukkainen", "ink232")
            .await
            .unwrap();
        state
            .registry
            .create(&user.identity(), NewBlog::new("Nueva nota", "inkinvissible", "google.com"))
            .await
            .unwrap();

        state.reset().await.unwrap();

        assert!(state.directory.list().await.unwrap().is_empty());
        assert!(state.registry.list_ordered().await.unwrap().is_empty());
        // リセット後は同じユーザー名で再登録できる
        state
            .directory
            .register("inkinvissible", "Matti Luukkainen", "ink232")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reset_refused_outside_test_mode() {
        let state = state(false).await;
        state
            .directory
            .register("inkinvissible", "Matti Luukkainen", "ink232")
            .await
            .unwrap();

        assert!(matches!(state.reset().await, Err(BlogError::Forbidden(_))));
        assert_eq!(state.directory.list().await.unwrap().len(), 1);
    }
}
