use anyhow::Result;
use assignfeed_core::feed::fetch_courses;
use assignfeed_core::{CanvasClient, FeedConfig};
use owo_colors::OwoColorize;

pub async fn run(config: &FeedConfig, json: bool) -> Result<()> {
    let client = CanvasClient::new(config)?;
    let courses = fetch_courses(&client, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
        return Ok(());
    }

    if courses.is_empty() {
        println!(
            "No {} courses found (or Canvas rejected the token).",
            config.enrollment_state
        );
        return Ok(());
    }

    for course in &courses {
        match course.id() {
            Some(id) => println!("{:>10}  {}", id.to_string().dimmed(), course.display_name()),
            None => println!(
                "{:>10}  {} {}",
                "-".dimmed(),
                course.display_name(),
                "(no id, skipped by render)".yellow()
            ),
        }
    }

    Ok(())
}
