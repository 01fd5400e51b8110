//! ブログレジストリ
//!
//! ブログの作成、いいね加算、所有者のみの削除、いいね数順の一覧を管理。
//! 各更新は単一のアトミックなリポジトリ呼び出しで完結し、操作間でロックを保持しない。

use crate::common::auth::Identity;
use crate::common::error::{BlogError, BlogResult};
use crate::common::types::{Blog, BlogView, NewBlog};
use crate::db::traits::BlogRepository;
use crate::ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// [`BlogRepository`]上のブログレジストリ
#[derive(Clone)]
pub struct BlogRegistry {
    repo: Arc<dyn BlogRepository>,
}

impl BlogRegistry {
    /// リポジトリからレジストリを作成
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// `identity`を所有者としてブログを作成（いいね数0）
    ///
    /// タイトルとURLは必須。著者が空の場合は作成者の表示名を使う。
    pub async fn create(&self, identity: &Identity, new_blog: NewBlog) -> BlogResult<Blog> {
        let title = new_blog.title.trim();
        let url = new_blog.url.trim();
        if title.is_empty() {
            return Err(BlogError::Validation("title is required".to_string()));
        }
        if url.is_empty() {
            return Err(BlogError::Validation("url is required".to_string()));
        }
        let author = match new_blog.author.trim() {
            "" => identity.name.as_str(),
            author => author,
        };

        let blog = self
            .repo
            .create_blog(identity.user_id, title, author, url)
            .await?;

        info!(blog_id = %blog.id, user_id = %identity.user_id, title = %blog.title, "Blog created");
        Ok(blog)
    }

    /// ブログを1件取得
    pub async fn get(&self, blog_id: Uuid) -> BlogResult<Blog> {
        self.repo
            .get_blog(blog_id)
            .await?
            .ok_or(BlogError::NotFound(blog_id))
    }

    /// いいねを1つ加算し、更新後のブログを返す
    ///
    /// 同一ユーザーによる重複いいねも加算する。
    pub async fn like(&self, blog_id: Uuid) -> BlogResult<Blog> {
        let blog = self
            .repo
            .increment_likes(blog_id)
            .await?
            .ok_or(BlogError::NotFound(blog_id))?;

        debug!(blog_id = %blog.id, likes = blog.likes, "Blog liked");
        Ok(blog)
    }

    /// `identity`が所有するブログを削除して返す
    ///
    /// 所有者以外は`Forbidden`（ブログは変更されない）、存在しないIDは`NotFound`。
    pub async fn delete(&self, identity: &Identity, blog_id: Uuid) -> BlogResult<Blog> {
        if let Some(blog) = self.repo.delete_owned(blog_id, identity.user_id).await? {
            info!(blog_id = %blog.id, user_id = %identity.user_id, "Blog deleted");
            return Ok(blog);
        }

        // 条件付き削除が空振り: 既に存在しないか、他人の所有
        match self.repo.get_blog(blog_id).await? {
            Some(blog) => {
                warn!(
                    blog_id = %blog.id,
                    owner = %blog.owner,
                    user_id = %identity.user_id,
                    "Rejected delete by non-owner"
                );
                Err(BlogError::Forbidden(format!(
                    "user {} does not own blog {}",
                    identity.user_id, blog_id
                )))
            }
            None => Err(BlogError::NotFound(blog_id)),
        }
    }

    /// 全ブログをいいね数降順で取得（同数は作成順）
    pub async fn list_ordered(&self) -> BlogResult<Vec<Blog>> {
        let blogs = self.repo.list_blogs().await?;
        Ok(ordering::rank_by_likes(blogs))
    }

    /// `identity`から見た一覧（削除可否付き）
    pub async fn list_for(&self, identity: &Identity) -> BlogResult<Vec<BlogView>> {
        let blogs = self.repo.list_blogs().await?;
        Ok(ordering::views_for(blogs, identity.user_id))
    }

    /// 指定ユーザーのブログをいいね数降順で取得
    pub async fn list_by_owner(&self, user_id: Uuid) -> BlogResult<Vec<Blog>> {
        let blogs = self.repo.list_blogs_by_owner(user_id).await?;
        Ok(ordering::rank_by_likes(blogs))
    }
}
