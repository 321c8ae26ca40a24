//! Fracture analysis daemon.
//!
//! Serves X-ray analysis, history queries, and the assistant chatbot over
//! HTTP. All state is in-memory; nothing survives a restart.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fractd::config::DaemonConfig;
use fractd::server;
use fractd::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("fractd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DaemonConfig::load();
    let state = AppState::new(config);

    server::run(state).await
}
