//! Fracture assistant CLI client.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fractctl::cli::{Cli, Commands};
use fractctl::client::DaemonClient;
use fractctl::commands;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let client = DaemonClient::new(cli.api_url.clone())?;

    match cli.command {
        Commands::Analyze {
            image,
            user,
            user_type,
            report,
            json,
        } => commands::analyze_command(&client, &image, &user, &user_type, report, json).await,
        Commands::History { json } => commands::history_command(&client, json).await,
        Commands::Chat { message } => commands::chat_command(&client, &message).await,
        Commands::Status => commands::status_command(&client).await,
    }
}
