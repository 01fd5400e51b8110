//! いいね数順の並び替え
//!
//! いいね数の多い順。同数のブログは入力順（リポジトリが返す作成順）を維持する。

use crate::common::types::{Blog, BlogView};
use std::cmp::Reverse;
use uuid::Uuid;

/// いいね数降順に並び替え（入力は作成順であること）
pub fn rank_by_likes(mut blogs: Vec<Blog>) -> Vec<Blog> {
    // sort_by_keyは安定ソート
    blogs.sort_by_key(|blog| Reverse(blog.likes));
    blogs
}

/// 並び替えて`viewer`の削除可否を付与
pub fn views_for(blogs: Vec<Blog>, viewer: Uuid) -> Vec<BlogView> {
    rank_by_likes(blogs)
        .into_iter()
        .map(|blog| {
            let removable = blog.is_owned_by(viewer);
            BlogView { blog, removable }
        })
        .collect()
}

/// いいね数降順に並んでいるか
pub fn is_ranked(blogs: &[Blog]) -> bool {
    blogs.windows(2).all(|pair| pair[0].likes >= pair[1].likes)
}
