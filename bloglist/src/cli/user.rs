//! register / login / users subcommands

use super::{authenticate, CredentialArgs};
use crate::notice;
use crate::AppState;
use clap::Args;
use serde::Serialize;

/// Arguments for the register subcommand
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Username (unique, case-sensitive)
    #[arg(short, long)]
    pub username: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Password
    #[arg(short, long, env = "BLOGLIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the users subcommand
#[derive(Args, Debug, Clone)]
pub struct UsersArgs {
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Serialize)]
struct UserWithBlogs {
    #[serde(flatten)]
    user: crate::common::auth::User,
    blogs: Vec<crate::common::types::Blog>,
}

/// Registers a user and prints its id.
pub async fn register(state: &AppState, args: &RegisterArgs) -> Result<String, anyhow::Error> {
    let user = state
        .directory
        .register(&args.username, &args.name, &args.password)
        .await?;
    Ok(format!("Registered {} ({})", user.username, user.id))
}

/// Verifies credentials.
pub async fn login(state: &AppState, args: &CredentialArgs) -> Result<String, anyhow::Error> {
    let identity = authenticate(state, args).await?;
    Ok(notice::logged_in(&identity))
}

/// Lists users and the blogs each one owns.
pub async fn users(state: &AppState, args: &UsersArgs) -> Result<String, anyhow::Error> {
    let mut entries = Vec::new();
    for user in state.directory.list().await? {
        let blogs = state.registry.list_by_owner(user.id).await?;
        entries.push(UserWithBlogs { user, blogs });
    }

    if args.json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    if entries.is_empty() {
        return Ok("No users".to_string());
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{} blogs",
                entry.user.username,
                entry.user.name,
                entry.blogs.len()
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
