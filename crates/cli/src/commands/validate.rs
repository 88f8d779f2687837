//! Validate command - check that a crew builds

use super::load_project;
use ck_core::agents::cli_executor::CliExecutor;
use colored::Colorize;
use color_eyre::eyre::{eyre, Result};
use std::path::Path;

pub async fn run(dir: &Path, name: &str) -> Result<()> {
    println!("{}", format!("Validating crew '{name}'...").bold());
    println!();

    let config = load_project(dir).await?;

    let crew = match config.build_crew(name) {
        Ok(crew) => crew,
        Err(e) => {
            eprintln!("  {} {}", "✗".red(), e);
            return Err(eyre!("Crew '{name}' is invalid"));
        }
    };

    println!(
        "  {} {} tasks, process {}",
        "✓".green(),
        crew.tasks().len(),
        crew.process()
    );
    for (index, task) in crew.tasks().iter().enumerate() {
        let sink = task
            .output_file
            .as_ref()
            .map(|p| format!(" -> {}", p.display()))
            .unwrap_or_default();
        println!(
            "    {}. {} ({}){}",
            index + 1,
            task.id,
            task.agent_id.cyan(),
            sink
        );
    }

    // Collaborator problems are warnings: the crew itself is valid.
    let mut warnings = Vec::new();
    match &config.global.llm.command {
        None => warnings.push("no [llm].command configured; 'crew run' will fail".to_string()),
        Some(command) if !CliExecutor::is_available(command) => {
            warnings.push(format!("model command '{}' not found on PATH", command.program))
        }
        Some(_) => {}
    }
    for agent in crew.agents().iter() {
        for tool in &agent.tools {
            if config.global.tool_command(&tool.kind).is_none() {
                warnings.push(format!(
                    "agent '{}' uses tool '{}' but [tools].{} is not configured",
                    agent.id, tool.kind, tool.kind
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for warning in &warnings {
            println!("  {} {}", "⚠".yellow(), warning);
        }
    }

    println!();
    println!("{}", "Crew is valid".green().bold());
    Ok(())
}
