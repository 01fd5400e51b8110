// ブログCRUD操作
//
// いいね加算と削除はどちらも単一ステートメントで完結させる。
// 読み取り→書き込みの競合を作らないため、ここでトランザクションは張らない。

use crate::common::error::BlogError;
use crate::common::types::Blog;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

const BLOG_COLUMNS: &str = "id, title, author, url, likes, owner_id, created_at";

/// ブログを作成（いいね数0）
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `owner` - 所有ユーザーID
/// * `title` - タイトル
/// * `author` - 著者の表示名
/// * `url` - リンク先URL
pub async fn create(
    pool: &SqlitePool,
    owner: Uuid,
    title: &str,
    author: &str,
    url: &str,
) -> Result<Blog, BlogError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO blogs (id, title, author, url, likes, owner_id, created_at)
         VALUES (?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(id.to_string())
    .bind(title)
    .bind(author)
    .bind(url)
    .bind(owner.to_string())
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to create blog: {}", e)))?;

    Ok(Blog {
        id,
        title: title.to_string(),
        author: author.to_string(),
        url: url.to_string(),
        likes: 0,
        owner,
        created_at,
    })
}

/// IDでブログを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Blog>, BlogError> {
    let row = sqlx::query_as::<_, BlogRow>(&format!(
        "SELECT {} FROM blogs WHERE id = ?",
        BLOG_COLUMNS
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to find blog: {}", e)))?;

    row.map(BlogRow::into_blog).transpose()
}

/// すべてのブログを作成順で取得
pub async fn list(pool: &SqlitePool) -> Result<Vec<Blog>, BlogError> {
    let rows = sqlx::query_as::<_, BlogRow>(&format!(
        "SELECT {} FROM blogs ORDER BY seq ASC",
        BLOG_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to list blogs: {}", e)))?;

    rows.into_iter().map(BlogRow::into_blog).collect()
}

/// 指定ユーザーのブログを作成順で取得
pub async fn list_by_owner(pool: &SqlitePool, owner: Uuid) -> Result<Vec<Blog>, BlogError> {
    let rows = sqlx::query_as::<_, BlogRow>(&format!(
        "SELECT {} FROM blogs WHERE owner_id = ? ORDER BY seq ASC",
        BLOG_COLUMNS
    ))
    .bind(owner.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to list blogs by owner: {}", e)))?;

    rows.into_iter().map(BlogRow::into_blog).collect()
}

/// いいね数を1加算
///
/// # Returns
/// * `Ok(Some(Blog))` - 加算後のブログ
/// * `Ok(None)` - ブログが存在しない
pub async fn increment_likes(pool: &SqlitePool, id: Uuid) -> Result<Option<Blog>, BlogError> {
    let row = sqlx::query_as::<_, BlogRow>(&format!(
        "UPDATE blogs SET likes = likes + 1 WHERE id = ? RETURNING {}",
        BLOG_COLUMNS
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to like blog: {}", e)))?;

    row.map(BlogRow::into_blog).transpose()
}

/// 所有者が一致する場合のみブログを削除
///
/// # Returns
/// * `Ok(Some(Blog))` - 削除されたブログ
/// * `Ok(None)` - 該当なし（存在しない、または所有者が異なる）
pub async fn delete_owned(
    pool: &SqlitePool,
    id: Uuid,
    owner: Uuid,
) -> Result<Option<Blog>, BlogError> {
    let row = sqlx::query_as::<_, BlogRow>(&format!(
        "DELETE FROM blogs WHERE id = ? AND owner_id = ? RETURNING {}",
        BLOG_COLUMNS
    ))
    .bind(id.to_string())
    .bind(owner.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| BlogError::Database(format!("Failed to delete blog: {}", e)))?;

    row.map(BlogRow::into_blog).transpose()
}

/// 全ブログを削除
///
/// # Returns
/// * `Ok(u64)` - 削除件数
pub async fn delete_all(conn: &mut SqliteConnection) -> Result<u64, BlogError> {
    let result = sqlx::query("DELETE FROM blogs")
        .execute(conn)
        .await
        .map_err(|e| BlogError::Database(format!("Failed to delete blogs: {}", e)))?;

    Ok(result.rows_affected())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct BlogRow {
    id: String,
    title: String,
    author: String,
    url: String,
    likes: i64,
    owner_id: String,
    created_at: String,
}

impl BlogRow {
    fn into_blog(self) -> Result<Blog, BlogError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| BlogError::Database(format!("Invalid blog id '{}': {}", self.id, e)))?;
        let owner = Uuid::parse_str(&self.owner_id).map_err(|e| {
            BlogError::Database(format!("Invalid owner id '{}': {}", self.owner_id, e))
        })?;
        let likes = u64::try_from(self.likes)
            .map_err(|_| BlogError::Database(format!("Negative like count on blog {}", id)))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| BlogError::Database(format!("Invalid created_at: {}", e)))?
            .with_timezone(&Utc);

        Ok(Blog {
            id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes,
            owner,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::users;

    async fn setup() -> (SqlitePool, Uuid) {
        let pool = crate::db::test_utils::test_db_pool().await;
        let user = users::create(&pool, "inkinvissible", "Matti Luukkainen", "hash")
            .await
            .unwrap();
        (pool, user.id)
    }

    #[tokio::test]
    async fn test_create_starts_with_zero_likes() {
        let (pool, owner) = setup().await;

        let blog = create(&pool, owner, "Nueva nota", "inkinvissible", "google.com")
            .await
            .unwrap();
        assert_eq!(blog.likes, 0);

        let stored = find_by_id(&pool, blog.id).await.unwrap().unwrap();
        assert_eq!(stored, blog);
    }

    #[tokio::test]
    async fn test_increment_likes_returns_updated_blog() {
        let (pool, owner) = setup().await;
        let blog = create(&pool, owner, "Nueva nota", "inkinvissible", "google.com")
            .await
            .unwrap();

        let liked = increment_likes(&pool, blog.id).await.unwrap().unwrap();
        assert_eq!(liked.likes, 1);
        let liked = increment_likes(&pool, blog.id).await.unwrap().unwrap();
        assert_eq!(liked.likes, 2);
    }

    #[tokio::test]
    async fn test_increment_likes_unknown_id() {
        let (pool, _) = setup().await;
        assert!(increment_likes(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_owned_requires_matching_owner() {
        let (pool, owner) = setup().await;
        let blog = create(&pool, owner, "Nota primera", "user", "google.com")
            .await
            .unwrap();

        let other = Uuid::new_v4();
        assert!(delete_owned(&pool, blog.id, other).await.unwrap().is_none());
        assert!(find_by_id(&pool, blog.id).await.unwrap().is_some());

        let removed = delete_owned(&pool, blog.id, owner).await.unwrap().unwrap();
        assert_eq!(removed.id, blog.id);
        assert!(find_by_id(&pool, blog.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_creation() {
        let (pool, owner) = setup().await;
        for title in ["a", "b", "c"] {
            create(&pool, owner, title, "author", "url").await.unwrap();
        }

        let titles: Vec<_> = list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_by_owner_filters() {
        let (pool, owner) = setup().await;
        let other = users::create(&pool, "someone", "Someone", "hash")
            .await
            .unwrap();
        create(&pool, owner, "mine", "a", "u").await.unwrap();
        create(&pool, other.id, "theirs", "b", "u").await.unwrap();

        let mine = list_by_owner(&pool, owner).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "mine");
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_blogs() {
        let (pool, owner) = setup().await;
        create(&pool, owner, "Nueva nota", "inkinvissible", "google.com")
            .await
            .unwrap();

        users::delete_all(&mut pool.acquire().await.unwrap()).await.unwrap();
        assert!(list(&pool).await.unwrap().is_empty());
    }
}
