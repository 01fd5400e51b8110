//! 統合テスト共通ヘルパー

use bloglist::common::auth::Identity;
use bloglist::db::migrations::initialize_database;
use bloglist::directory::CredentialPolicy;
use bloglist::AppState;
use tempfile::TempDir;

/// テスト用のアプリケーション状態
///
/// 一時ディレクトリ上のSQLiteファイルを使う（複数接続で並行アクセス可能）。
/// `TempDir`はテスト終了まで保持すること。
pub struct TestApp {
    pub state: AppState,
    _dir: TempDir,
}

/// テスト用の状態を作成する（bcryptコストは最小）
pub async fn create_test_app(test_mode: bool) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("bloglist.db").display());
    let pool = initialize_database(&url)
        .await
        .expect("Failed to initialize database");
    let policy = CredentialPolicy {
        hash_cost: 4,
        ..CredentialPolicy::default()
    };

    TestApp {
        state: AppState::new(pool, policy, test_mode),
        _dir: dir,
    }
}

/// ユーザーを登録してログインする
#[allow(dead_code)]
pub async fn register_and_login(
    state: &AppState,
    username: &str,
    name: &str,
    password: &str,
) -> Identity {
    state
        .directory
        .register(username, name, password)
        .await
        .expect("Failed to register user");
    state
        .directory
        .authenticate(username, password)
        .await
        .expect("Failed to authenticate")
}
