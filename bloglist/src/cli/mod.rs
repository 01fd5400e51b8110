//! CLI module for bloglist
//!
//! Each subcommand renders its output as a string; `main` prints it.

/// Blog subcommands (create, like, delete, list)
pub mod blog;
/// Reset subcommand
pub mod reset;
/// User subcommands (register, login, users)
pub mod user;

use crate::common::auth::Identity;
use crate::common::error::BlogError;
use crate::notice;
use crate::AppState;
use clap::{Args, Parser, Subcommand};

/// Bloglist - share blogs, like them, see the most liked first
#[derive(Parser, Debug)]
#[command(name = "bloglist")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    BLOGLIST_DATABASE_URL       Database URL (default: sqlite://bloglist.db)
    BLOGLIST_LOG_LEVEL          Log level (default: info)
    BLOGLIST_LOG_FORMAT         Log format: pretty | json (default: pretty)
    BLOGLIST_MIN_PASSWORD_LEN   Minimum password length (default: 3)
    BLOGLIST_BCRYPT_COST        bcrypt cost (default: 12)
    BLOGLIST_TEST_MODE          Enable the reset command (dev/test only)
    BLOGLIST_USERNAME           Default --username
    BLOGLIST_PASSWORD           Default --password
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new user
    Register(user::RegisterArgs),
    /// Check credentials
    Login(CredentialArgs),
    /// List registered users with their blogs
    Users(user::UsersArgs),
    /// Create a blog
    Create(blog::CreateArgs),
    /// Like a blog
    Like(blog::LikeArgs),
    /// Delete one of your blogs
    Delete(blog::DeleteArgs),
    /// List blogs, most liked first
    List(blog::ListArgs),
    /// Remove all users and blogs (test mode only)
    Reset,
}

/// Username and password of the acting user
#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Username
    #[arg(short, long, env = "BLOGLIST_USERNAME")]
    pub username: String,

    /// Password
    #[arg(short, long, env = "BLOGLIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Authenticates the acting user.
///
/// Any credential failure is reported with the same message.
pub async fn authenticate(
    state: &AppState,
    credentials: &CredentialArgs,
) -> Result<Identity, anyhow::Error> {
    state
        .directory
        .authenticate(&credentials.username, &credentials.password)
        .await
        .map_err(|e| match e {
            BlogError::InvalidCredentials => anyhow::anyhow!(notice::LOGIN_FAILED),
            other => other.into(),
        })
}

/// Dispatches a parsed command.
pub async fn execute(state: &AppState, command: &Commands) -> Result<String, anyhow::Error> {
    match command {
        Commands::Register(args) => user::register(state, args).await,
        Commands::Login(args) => user::login(state, args).await,
        Commands::Users(args) => user::users(state, args).await,
        Commands::Create(args) => blog::create(state, args).await,
        Commands::Like(args) => blog::like(state, args).await,
        Commands::Delete(args) => blog::delete(state, args).await,
        Commands::List(args) => blog::list(state, args).await,
        Commands::Reset => reset::execute(state).await,
    }
}
