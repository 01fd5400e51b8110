// 認証関連のデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザー
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: Uuid,
    /// ユーザー名（一意、大文字小文字を区別）
    pub username: String,
    /// 表示名
    pub name: String,
    /// パスワードハッシュ（bcrypt）
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 認証済みIDに変換
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// 認証済みユーザーの表現
///
/// 所有権チェックに使う安定したIDと表示名を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// ユーザーID
    pub user_id: Uuid,
    /// ユーザー名
    pub username: String,
    /// 表示名
    pub name: String,
}
