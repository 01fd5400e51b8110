//! create / like / delete / list subcommands

use super::{authenticate, CredentialArgs};
use crate::common::types::{Blog, NewBlog};
use crate::notice;
use crate::AppState;
use clap::Args;
use uuid::Uuid;

/// Arguments for the create subcommand
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Acting user
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Blog title
    #[arg(short, long)]
    pub title: String,

    /// Author shown with the blog (defaults to your display name)
    #[arg(short, long, default_value = "")]
    pub author: String,

    /// Blog URL
    #[arg(long)]
    pub url: String,
}

/// Arguments for the like subcommand
#[derive(Args, Debug, Clone)]
pub struct LikeArgs {
    /// Acting user
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Blog id
    pub id: Uuid,
}

/// Arguments for the delete subcommand
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Acting user (must be the blog's creator)
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Blog id
    pub id: Uuid,
}

/// Arguments for the list subcommand
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// View as this user (marks the blogs you can remove)
    #[arg(short, long, env = "BLOGLIST_USERNAME", requires = "password")]
    pub username: Option<String>,

    /// Password for --username
    #[arg(
        short,
        long,
        env = "BLOGLIST_PASSWORD",
        hide_env_values = true,
        requires = "username"
    )]
    pub password: Option<String>,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Creates a blog as the authenticated user.
pub async fn create(state: &AppState, args: &CreateArgs) -> Result<String, anyhow::Error> {
    let identity = authenticate(state, &args.credentials).await?;
    let blog = state
        .registry
        .create(&identity, NewBlog::new(&args.title, &args.author, &args.url))
        .await?;
    Ok(format!("{}\n{}", notice::blog_created(&blog), blog.id))
}

/// Likes a blog.
pub async fn like(state: &AppState, args: &LikeArgs) -> Result<String, anyhow::Error> {
    authenticate(state, &args.credentials).await?;
    let blog = state.registry.like(args.id).await?;
    Ok(format!(
        "{}\n{}",
        notice::blog_liked(&blog),
        notice::likes(&blog)
    ))
}

/// Deletes a blog owned by the authenticated user.
pub async fn delete(state: &AppState, args: &DeleteArgs) -> Result<String, anyhow::Error> {
    let identity = authenticate(state, &args.credentials).await?;
    state.registry.delete(&identity, args.id).await?;
    Ok(notice::BLOG_DELETED.to_string())
}

/// Lists blogs, most liked first.
pub async fn list(state: &AppState, args: &ListArgs) -> Result<String, anyhow::Error> {
    let viewer = match (&args.username, &args.password) {
        (Some(username), Some(password)) => {
            let credentials = CredentialArgs {
                username: username.clone(),
                password: password.clone(),
            };
            Some(authenticate(state, &credentials).await?)
        }
        _ => None,
    };

    match viewer {
        Some(identity) => {
            let views = state.registry.list_for(&identity).await?;
            if args.json {
                return Ok(serde_json::to_string_pretty(&views)?);
            }
            Ok(render(views.iter().map(|v| (&v.blog, v.removable))))
        }
        None => {
            let blogs = state.registry.list_ordered().await?;
            if args.json {
                return Ok(serde_json::to_string_pretty(&blogs)?);
            }
            Ok(render(blogs.iter().map(|b| (b, false))))
        }
    }
}

fn render<'a>(rows: impl Iterator<Item = (&'a Blog, bool)>) -> String {
    let lines: Vec<String> = rows
        .map(|(blog, removable)| {
            let mut line = format!(
                "{}\t{} {}\t{}\t{}",
                blog.id,
                blog.title,
                blog.author,
                blog.url,
                notice::likes(blog)
            );
            if removable {
                line.push_str("\t[remove]");
            }
            line
        })
        .collect();

    if lines.is_empty() {
        "No blogs".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_render_marks_removable() {
        let blog = Blog {
            id: Uuid::nil(),
            title: "Nueva nota".to_string(),
            author: "inkinvissible".to_string(),
            url: "google.com".to_string(),
            likes: 1,
            owner: Uuid::nil(),
            created_at: Utc::now(),
        };

        let out = render([(&blog, true)].into_iter());
        assert!(out.contains("Nueva nota inkinvissible"));
        assert!(out.contains("Likes: 1"));
        assert!(out.ends_with("[remove]"));

        let out = render([(&blog, false)].into_iter());
        assert!(!out.contains("[remove]"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(std::iter::empty()), "No blogs");
    }
}
