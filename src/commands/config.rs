use std::path::Path;

use anyhow::Result;
use assignfeed_core::FeedConfig;
use owo_colors::OwoColorize;

pub fn run(path_override: Option<&Path>, show: bool) -> Result<()> {
    let config_path = match path_override {
        Some(path) => path.to_path_buf(),
        None => FeedConfig::config_path()?,
    };

    if !config_path.exists() {
        FeedConfig::create_default_config(&config_path)?;
        println!("Created {}", config_path.display());
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());

    if show {
        let config = FeedConfig::load(Some(&config_path))?;
        println!();
        println!("{}", "Effective configuration".bold());
        print!("{}", toml::to_string_pretty(&config.redacted())?);
    }

    Ok(())
}
