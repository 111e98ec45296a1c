mod commands;

use std::path::PathBuf;

use anyhow::Result;
use assignfeed_core::FeedConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "assignfeed-cli")]
#[command(about = "Render your Canvas assignment deadlines as an ICS calendar")]
struct Cli {
    /// Config file (defaults to ~/.config/assignfeed/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all assignments and write the calendar
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the courses the feed would read from
    Courses {
        /// Print the raw course records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show where configuration lives
    Config {
        /// Also print the effective configuration (token redacted)
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Render { output } => {
            let config = load_config(cli.config.as_deref())?;
            commands::render::run(&config, output.as_deref()).await
        }
        Commands::Courses { json } => {
            let config = load_config(cli.config.as_deref())?;
            commands::courses::run(&config, json).await
        }
        Commands::Config { show } => commands::config::run(cli.config.as_deref(), show),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<FeedConfig> {
    FeedConfig::load(path).map_err(|e| {
        anyhow::anyhow!(
            "{e}\n\n\
            Set base_url and access_token in the config file (see `assignfeed-cli config`)\n\
            or export ASSIGNFEED_BASE_URL and ASSIGNFEED_ACCESS_TOKEN."
        )
    })
}
