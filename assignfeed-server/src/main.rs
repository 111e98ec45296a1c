mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use assignfeed_core::FeedConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "assignfeed-server")]
#[command(about = "Serve Canvas assignment deadlines as an ICS feed")]
struct Args {
    /// Config file (defaults to ~/.config/assignfeed/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `listen` from the config
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = FeedConfig::load(args.config.as_deref())?;
    let addr = match args.listen {
        Some(addr) => addr,
        None => config
            .listen
            .parse()
            .with_context(|| format!("Invalid listen address '{}'", config.listen))?,
    };

    tracing::debug!(?config, "Configuration loaded");

    let app = routes::app(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("assignfeed-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
