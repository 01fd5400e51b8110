// パスワードハッシュ化と検証（bcrypt実装）

use crate::common::error::BlogError;
use bcrypt::{hash, verify};

/// パスワードハッシュ化のデフォルトコスト（12推奨、200-300ms）
pub const DEFAULT_HASH_COST: u32 = 12;

/// bcryptが受け付けるコストの範囲
pub const HASH_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// パスワードをbcryptでハッシュ化
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
/// * `cost` - bcryptコスト（4〜31）
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる）
/// * `Err(BlogError)` - ハッシュ化失敗
pub fn hash_password(password: &str, cost: u32) -> Result<String, BlogError> {
    hash(password, cost)
        .map_err(|e| BlogError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(BlogError)` - 検証失敗（ハッシュ形式不正など）
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BlogError> {
    verify(password, hash)
        .map_err(|e| BlogError::PasswordHash(format!("Failed to verify password: {}", e)))
}
