//! Bloglist CLI Entry Point

use bloglist::cli::{self, Cli};
use bloglist::config::AppConfig;
use bloglist::db::migrations::initialize_database;
use bloglist::{logging, AppState};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match run(cli, config).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<String, anyhow::Error> {
    tracing::debug!(database_url = %config.database_url, "Opening database");
    let pool = initialize_database(&config.database_url).await?;
    let state = AppState::new(pool.clone(), config.credentials, config.test_mode);

    let result = cli::execute(&state, &cli.command).await;
    pool.close().await;
    result
}
