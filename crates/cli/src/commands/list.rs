//! List command - show the project's crews

use super::load_project;
use colored::Colorize;
use color_eyre::eyre::Result;
use std::path::Path;

pub async fn run(dir: &Path) -> Result<()> {
    let config = load_project(dir).await?;

    if config.crews.is_empty() {
        println!("No crews defined in .crew-kit/crews/");
        return Ok(());
    }

    println!("{}", "Crews:".bold());
    for crew in &config.crews {
        let summary = if crew.description.is_empty() {
            String::new()
        } else {
            format!(" - {}", crew.description)
        };
        println!("  {}{}", crew.name.cyan(), summary);
        println!(
            "    {} tasks, agents: {}",
            crew.tasks.len(),
            crew.referenced_agents().join(", ")
        );
    }

    println!();
    println!("{} agents defined", config.agents.len());
    Ok(())
}
