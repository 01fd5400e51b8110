//! ユーザー向け通知メッセージ

use crate::common::auth::Identity;
use crate::common::types::Blog;

/// ログイン失敗時（未登録ユーザーとパスワード誤りで共通）
pub const LOGIN_FAILED: &str = "Something happened. You could not log in. Wrong user or password";

/// ブログ削除後
pub const BLOG_DELETED: &str = "Blog successfully deleted";

/// `"{name} logged in"`
pub fn logged_in(identity: &Identity) -> String {
    format!("{} logged in", identity.name)
}

/// `"New blog created successfully. {title} by {author}"`
pub fn blog_created(blog: &Blog) -> String {
    format!(
        "New blog created successfully. {} by {}",
        blog.title, blog.author
    )
}

/// `"You liked : {title}"`
pub fn blog_liked(blog: &Blog) -> String {
    format!("You liked : {}", blog.title)
}

/// `"Likes: {n}"`
pub fn likes(blog: &Blog) -> String {
    format!("Likes: {}", blog.likes)
}
