//! reset subcommand
//!
//! Removes all data. Only available when `BLOGLIST_TEST_MODE` is set.

use crate::AppState;

/// Clears all users and blogs.
pub async fn execute(state: &AppState) -> Result<String, anyhow::Error> {
    state.reset().await?;
    Ok("All users and blogs removed".to_string())
}
