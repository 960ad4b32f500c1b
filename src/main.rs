//! Backgammon server entrypoint.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use backgammon_server::{SessionManager, router};
use clap::Parser;
use cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let port = cli.port.unwrap_or_else(|| {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000)
    });

    info!(host = %cli.host, port, "starting backgammon server");

    let sessions = SessionManager::new();
    let app = router(sessions);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", cli.host, port)).await?;
    info!("server ready at http://{}:{}/", cli.host, port);

    axum::serve(listener, app).await?;

    Ok(())
}
