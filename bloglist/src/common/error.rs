//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `BlogError`は`error_type()`・`external_message()`・`status_code()`を提供し、
//! 外部のトランスポート層がプロトコルレベルのステータスへ変換できるようにする。

use thiserror::Error;
use uuid::Uuid;

/// bloglist error type
#[derive(Debug, Error)]
pub enum BlogError {
    /// Username is already registered
    #[error("Username '{0}' already exists")]
    DuplicateUser(String),

    /// Unknown user or wrong password. Never says which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Blog not found
    #[error("Blog not found: {0}")]
    NotFound(Uuid),

    /// Caller is not allowed to perform the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Empty or malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl BlogError {
    /// Returns a safe error message for external clients.
    ///
    /// Infrastructure details (SQL errors, hash failures) stay in the server
    /// logs; use `to_string()` there.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::DuplicateUser(_) => "Username must be unique",
            Self::InvalidCredentials => "Wrong user or password",
            Self::NotFound(_) => "Blog not found",
            Self::Forbidden(_) => "Only the creator can delete a blog",
            Self::Validation(_) => "Invalid request",
            Self::Database(_) => "Internal server error",
            Self::PasswordHash(_) => "Internal server error",
        }
    }

    /// Returns the error type string.
    ///
    /// - `invalid_request_error`: bad input, duplicate username
    /// - `authentication_error`: login failures
    /// - `permission_error`: ownership failures
    /// - `not_found_error`: unknown blog
    /// - `server_error`: storage or hashing failures
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::DuplicateUser(_) => "invalid_request_error",
            Self::InvalidCredentials => "authentication_error",
            Self::NotFound(_) => "not_found_error",
            Self::Forbidden(_) => "permission_error",
            Self::Validation(_) => "invalid_request_error",
            Self::Database(_) => "server_error",
            Self::PasswordHash(_) => "server_error",
        }
    }

    /// Returns the HTTP status code a transport layer should use.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateUser(_) => 400,
            Self::InvalidCredentials => 401,
            Self::NotFound(_) => 404,
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::Database(_) => 500,
            Self::PasswordHash(_) => 500,
        }
    }
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Result type alias
pub type BlogResult<T> = Result<T, BlogError>;
