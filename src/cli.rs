//! Command-line interface for the backgammon server.

use clap::Parser;

/// Backgammon server - server-authoritative rules engine over HTTP
#[derive(Parser, Debug)]
#[command(name = "backgammon_server")]
#[command(about = "Server-authoritative backgammon table service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to bind to (falls back to the PORT environment variable, then 5000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
}
