//! アカウントディレクトリ
//!
//! ユーザー登録とログイン認証。認証成功時の[`Identity`]を
//! ブログレジストリが所有者判定に使う。

use crate::auth::password::{hash_password, verify_password, DEFAULT_HASH_COST};
use crate::common::auth::{Identity, User};
use crate::common::error::{BlogError, BlogResult};
use crate::db::traits::UserRepository;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 登録時のユーザー名最小文字数
pub const MIN_USERNAME_LEN: usize = 3;

/// 登録ルールとハッシュコスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    /// ユーザー名の最小文字数
    pub min_username_len: usize,
    /// パスワードの最小文字数
    pub min_password_len: usize,
    /// bcryptコスト
    pub hash_cost: u32,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            min_username_len: MIN_USERNAME_LEN,
            min_password_len: 3,
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

/// [`UserRepository`]上のユーザーディレクトリ
#[derive(Clone)]
pub struct AccountDirectory {
    repo: Arc<dyn UserRepository>,
    policy: CredentialPolicy,
}

impl AccountDirectory {
    /// リポジトリからディレクトリを作成
    pub fn new(repo: Arc<dyn UserRepository>, policy: CredentialPolicy) -> Self {
        Self { repo, policy }
    }

    /// 適用中の登録ルール
    pub fn policy(&self) -> CredentialPolicy {
        self.policy
    }

    /// 新規ユーザーを登録
    ///
    /// ユーザー名が短い、前後に空白を含む、パスワードが短い場合は`Validation`、
    /// ユーザー名が使用済みの場合は`DuplicateUser`。
    pub async fn register(&self, username: &str, name: &str, password: &str) -> BlogResult<User> {
        if username.trim() != username {
            return Err(BlogError::Validation(
                "username must not start or end with whitespace".to_string(),
            ));
        }
        if username.chars().count() < self.policy.min_username_len {
            return Err(BlogError::Validation(format!(
                "username must be at least {} characters",
                self.policy.min_username_len
            )));
        }
        if password.chars().count() < self.policy.min_password_len {
            return Err(BlogError::Validation(format!(
                "password must be at least {} characters",
                self.policy.min_password_len
            )));
        }

        let password_hash = hash_password(password, self.policy.hash_cost)?;
        let user = self
            .repo
            .create_user(username, name.trim(), &password_hash)
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// 認証情報を検証してIdentityを返す
    ///
    /// 未登録ユーザーとパスワード誤りはどちらも`InvalidCredentials`。
    pub async fn authenticate(&self, username: &str, password: &str) -> BlogResult<Identity> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            warn!(username = %username, "Login failed");
            return Err(BlogError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(username = %username, "Login failed");
            return Err(BlogError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user.identity())
    }

    /// IDでユーザーを検索
    pub async fn find_by_id(&self, id: Uuid) -> BlogResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// 全ユーザーを登録順で取得
    pub async fn list(&self) -> BlogResult<Vec<User>> {
        self.repo.list_users().await
    }
}
