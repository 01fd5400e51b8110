//! ブログ関連の型定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ブログ投稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// ブログID
    pub id: Uuid,
    /// タイトル
    pub title: String,
    /// 著者の表示名（表示用に非正規化）
    pub author: String,
    /// リンク先URL
    pub url: String,
    /// いいね数（0から単調増加）
    pub likes: u64,
    /// 所有ユーザーID（作成後は不変）
    pub owner: Uuid,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

impl Blog {
    /// 指定ユーザーが所有者かどうか
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }
}

/// ブログ作成リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBlog {
    /// タイトル
    pub title: String,
    /// 著者（空の場合は作成者の表示名）
    #[serde(default)]
    pub author: String,
    /// リンク先URL
    pub url: String,
}

impl NewBlog {
    /// 新しいリクエストを作成
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }
}

/// 閲覧者ごとのブログ表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogView {
    /// ブログ本体
    #[serde(flatten)]
    pub blog: Blog,
    /// 閲覧者が削除ボタンを表示できるか（所有者のみ）
    pub removable: bool,
}
