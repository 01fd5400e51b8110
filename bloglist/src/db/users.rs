// ユーザーCRUD操作

use crate::common::auth::User;
use crate::common::error::BlogError;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `username` - ユーザー名
/// * `name` - 表示名
/// * `password_hash` - bcryptハッシュ化されたパスワード
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(BlogError::DuplicateUser)` - ユーザー名重複
/// * `Err(BlogError)` - その他の作成失敗
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, BlogError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, username, name, password_hash, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            BlogError::DuplicateUser(username.to_string())
        } else {
            BlogError::Database(format!("Failed to create user: {}", e))
        }
    })?;

    Ok(User {
        id,
        username: username.to_string(),
        name: name.to_string(),
        password_hash: password_hash.to_string(),
        created_at,
    })
}

/// ユーザー名でユーザーを検索
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(BlogError)` - 検索失敗
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, BlogError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, name, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose()
}

/// IDでユーザーを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, BlogError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, name, password_hash, created_at FROM users WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose()
}

/// すべてのユーザーを登録順で取得
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, BlogError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, name, password_hash, created_at FROM users ORDER BY rowid ASC",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to list users: {}", e)))?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// 全ユーザーを削除
///
/// # Returns
/// * `Ok(u64)` - 削除件数
pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, BlogError> {
    let result = sqlx::query("DELETE FROM users")
        .execute(conn)
        .await
        .map_err(|e| BlogError::Database(format!("Failed to delete users: {}", e)))?;

    Ok(result.rows_affected())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    name: String,
    password_hash: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, BlogError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| BlogError::Database(format!("Invalid user id '{}': {}", self.id, e)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| BlogError::Database(format!("Invalid created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(User {
            id,
            username: self.username,
            name: self.name,
            password_hash: self.password_hash,
            created_at,
        })
    }
}
