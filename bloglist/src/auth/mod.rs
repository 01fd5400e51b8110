//! 認証機能
//!
//! 資格情報の検証はbcryptに委譲する。

/// パスワードハッシュ化・検証
pub mod password;
