//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs, and the aggregated
//! [`AppConfig`] used by the binary.

use crate::auth::password::{DEFAULT_HASH_COST, HASH_COST_RANGE};
use crate::directory::{CredentialPolicy, MIN_USERNAME_LEN};

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use bloglist::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("BLOGLIST_DATABASE_URL", "DATABASE_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl LogConfig {
    /// Load logging configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            level: get_env_with_fallback_or("BLOGLIST_LOG_LEVEL", "LOG_LEVEL", "info"),
            format: get_env_with_fallback_or("BLOGLIST_LOG_FORMAT", "LOG_FORMAT", "pretty"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Test mode switch
///
/// `BLOGLIST_TEST_MODE` (true/1/yes/on) enables the destructive reset hook.
/// `NODE_ENV=test` is honoured as a legacy alias.
pub fn is_test_mode() -> bool {
    if let Ok(value) = std::env::var("BLOGLIST_TEST_MODE") {
        return is_truthy(&value);
    }
    match std::env::var("NODE_ENV") {
        Ok(value) if value == "test" => {
            tracing::warn!(
                "Environment variable 'NODE_ENV=test' is deprecated, use 'BLOGLIST_TEST_MODE' instead"
            );
            true
        }
        _ => false,
    }
}

/// bcrypt cost from `BLOGLIST_BCRYPT_COST`
///
/// Values outside 4..=31 fall back to the default with a warning.
fn hash_cost_from_env() -> u32 {
    let cost = get_env_with_fallback_parse("BLOGLIST_BCRYPT_COST", "BCRYPT_COST", DEFAULT_HASH_COST);
    if HASH_COST_RANGE.contains(&cost) {
        return cost;
    }
    tracing::warn!(
        cost,
        default = DEFAULT_HASH_COST,
        "BLOGLIST_BCRYPT_COST out of range (4-31), using default"
    );
    DEFAULT_HASH_COST
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL
    pub database_url: String,
    /// Logging
    pub log: LogConfig,
    /// Registration rules and hashing cost
    pub credentials: CredentialPolicy,
    /// Whether `reset` is allowed
    pub test_mode: bool,
}

impl AppConfig {
    /// Load the whole configuration from environment variables.
    pub fn from_env() -> Self {
        let credentials = CredentialPolicy {
            min_username_len: MIN_USERNAME_LEN,
            min_password_len: get_env_with_fallback_parse(
                "BLOGLIST_MIN_PASSWORD_LEN",
                "MIN_PASSWORD_LEN",
                3usize,
            ),
            hash_cost: hash_cost_from_env(),
        };

        Self {
            database_url: get_env_with_fallback_or(
                "BLOGLIST_DATABASE_URL",
                "DATABASE_URL",
                "sqlite://bloglist.db",
            ),
            log: LogConfig::from_env(),
            credentials,
            test_mode: is_test_mode(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bloglist.db".to_string(),
            log: LogConfig::default(),
            credentials: CredentialPolicy::default(),
            test_mode: false,
        }
    }
}
