mod config;
mod db;
mod pages;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, ConfigError};
use crate::services::account;
use crate::services::auth::PgAuthAdapter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "unrlsd", about = "UNRLSD account server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Connect to the database, upsert a test user and list all users.
    DbCheck,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::DbCheck => db_check(&config).await,
    }
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let auth = Arc::new(PgAuthAdapter::new(pool, config.session_ttl));
    let port = config.port;
    let app = routes::app(state::AppState::new(auth, config));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "unrlsd listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn db_check(config: &AppConfig) -> Result<(), AppError> {
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("database connection ok");

    let id = account::ensure_user(&pool, "test@example.com", "Test User").await?;
    tracing::info!(%id, "test user ready");

    let users = account::list_users(&pool).await?;
    tracing::info!(count = users.len(), "users in database");
    for user in &users {
        tracing::info!(id = %user.id, email = %user.email, name = %user.name, "user");
    }
    Ok(())
}
