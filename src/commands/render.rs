use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use assignfeed_core::feed::build_feed;
use assignfeed_core::{CanvasClient, FeedConfig};

pub async fn run(config: &FeedConfig, output: Option<&Path>) -> Result<()> {
    let client = CanvasClient::new(config)?;
    let ics = build_feed(&client, config).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;

            let events = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
            eprintln!("Wrote {} event(s) to {}", events, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(ics.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
