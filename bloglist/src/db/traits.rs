//! Repository traitパターン定義
//!
//! ストレージ操作を抽象化し、ディレクトリ・レジストリをSQLiteから切り離す。
//! 各traitは`users`/`blogs`モジュールのフリー関数に対応する。

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::common::auth::User;
use crate::common::error::BlogError;
use crate::common::types::Blog;

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

/// ユーザー操作のRepository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成（ユーザー名重複は`DuplicateUser`）
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, BlogError>;
    /// ユーザー名でユーザーを検索
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, BlogError>;
    /// IDでユーザーを検索
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BlogError>;
    /// ユーザー一覧を登録順で取得
    async fn list_users(&self) -> Result<Vec<User>, BlogError>;
}

// ---------------------------------------------------------------------------
// BlogRepository
// ---------------------------------------------------------------------------

/// ブログ操作のRepository trait
///
/// 一覧系は作成順で返すこと。並び替えは`ordering`が行う。
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// ブログを作成
    async fn create_blog(
        &self,
        owner: Uuid,
        title: &str,
        author: &str,
        url: &str,
    ) -> Result<Blog, BlogError>;
    /// IDでブログを取得
    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, BlogError>;
    /// 全ブログを作成順で取得
    async fn list_blogs(&self) -> Result<Vec<Blog>, BlogError>;
    /// 所有者のブログを作成順で取得
    async fn list_blogs_by_owner(&self, owner: Uuid) -> Result<Vec<Blog>, BlogError>;
    /// いいね数をアトミックに1加算（存在しなければ`None`）
    async fn increment_likes(&self, id: Uuid) -> Result<Option<Blog>, BlogError>;
    /// 所有者一致時のみアトミックに削除（該当なしは`None`）
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Blog>, BlogError>;
}

// ---------------------------------------------------------------------------
// SqlitePool implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for SqlitePool {
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, BlogError> {
        super::users::create(self, username, name, password_hash).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, BlogError> {
        super::users::find_by_username(self, username).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BlogError> {
        super::users::find_by_id(self, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, BlogError> {
        super::users::list(self).await
    }
}

#[async_trait]
impl BlogRepository for SqlitePool {
    async fn create_blog(
        &self,
        owner: Uuid,
        title: &str,
        author: &str,
        url: &str,
    ) -> Result<Blog, BlogError> {
        super::blogs::create(self, owner, title, author, url).await
    }

    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, BlogError> {
        super::blogs::find_by_id(self, id).await
    }

    async fn list_blogs(&self) -> Result<Vec<Blog>, BlogError> {
        super::blogs::list(self).await
    }

    async fn list_blogs_by_owner(&self, owner: Uuid) -> Result<Vec<Blog>, BlogError> {
        super::blogs::list_by_owner(self, owner).await
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Option<Blog>, BlogError> {
        super::blogs::increment_likes(self, id).await
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Blog>, BlogError> {
        super::blogs::delete_owned(self, id, owner).await
    }
}

// ---------------------------------------------------------------------------
// Mock implementations
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    /// メモリ上のユーザーリポジトリ
    #[derive(Default)]
    pub(crate) struct MockUserRepository {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create_user(
            &self,
            username: &str,
            name: &str,
            password_hash: &str,
        ) -> Result<User, BlogError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == username) {
                return Err(BlogError::DuplicateUser(username.to_string()));
            }
            let user = User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, BlogError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, BlogError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn list_users(&self) -> Result<Vec<User>, BlogError> {
            Ok(self.users.lock().unwrap().clone())
        }
    }

    /// メモリ上のブログリポジトリ（Vecの順序が作成順）
    #[derive(Default)]
    pub(crate) struct MockBlogRepository {
        blogs: Mutex<Vec<Blog>>,
    }

    #[async_trait]
    impl BlogRepository for MockBlogRepository {
        async fn create_blog(
            &self,
            owner: Uuid,
            title: &str,
            author: &str,
            url: &str,
        ) -> Result<Blog, BlogError> {
            let blog = Blog {
                id: Uuid::new_v4(),
                title: title.to_string(),
                author: author.to_string(),
                url: url.to_string(),
                likes: 0,
                owner,
                created_at: Utc::now(),
            };
            self.blogs.lock().unwrap().push(blog.clone());
            Ok(blog)
        }

        async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, BlogError> {
            Ok(self
                .blogs
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.id == id)
                .cloned())
        }

        async fn list_blogs(&self) -> Result<Vec<Blog>, BlogError> {
            Ok(self.blogs.lock().unwrap().clone())
        }

        async fn list_blogs_by_owner(&self, owner: Uuid) -> Result<Vec<Blog>, BlogError> {
            Ok(self
                .blogs
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.owner == owner)
                .cloned()
                .collect())
        }

        async fn increment_likes(&self, id: Uuid) -> Result<Option<Blog>, BlogError> {
            let mut blogs = self.blogs.lock().unwrap();
            Ok(blogs.iter_mut().find(|b| b.id == id).map(|b| {
                b.likes += 1;
                b.clone()
            }))
        }

        async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Blog>, BlogError> {
            let mut blogs = self.blogs.lock().unwrap();
            match blogs.iter().position(|b| b.id == id && b.owner == owner) {
                Some(index) => Ok(Some(blogs.remove(index))),
                None => Ok(None),
            }
        }
    }
}
