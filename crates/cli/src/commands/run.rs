//! Run command - execute a crew

use super::load_project;
use ck_core::agents::ClientFactory;
use ck_core::config::credentials::load_api_key;
use ck_core::engine::CrewEngine;
use ck_protocol::events::Event;
use colored::Colorize;
use color_eyre::eyre::{eyre, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

pub async fn run(dir: &Path, name: &str, output_root: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_project(dir).await?;

    // The key is needed before anything else can happen.
    let api_key = load_api_key(&config.global.llm.api_key_env)?;

    let crew = config.build_crew(name)?;
    let model = ClientFactory::model_client(&config.global, api_key)
        .map_err(|e| eyre!("{e}\n\nConfigure [llm].command in .crew-kit/config.toml."))?;
    let tools = ClientFactory::tool_invoker(&config.global);

    let output_root = output_root.unwrap_or_else(|| dir.join(&config.global.engine.output_root));
    tracing::debug!(
        crew = %name,
        tasks = crew.tasks().len(),
        output_root = %output_root.display(),
        "engine ready"
    );
    let engine = CrewEngine::new(ClientFactory::executor(&config.global, model, tools))
        .with_output_root(output_root);

    let (events_tx, events_rx) = mpsc::channel(256);
    let printer = tokio::spawn(print_events(events_rx, !json));

    let outcome = engine.run(&crew, events_tx).await;
    let _ = printer.await;

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!();
            eprintln!(
                "{} task '{}' failed after {} completed task(s)",
                "✗".red(),
                e.task_id,
                e.completed.len()
            );
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(last) = result.final_output() {
        println!();
        println!("{}", format!("Final answer ({})", last.task_id).bold());
        println!("{}", last.text);
    }
    for path in &result.written_artifacts {
        println!("{} wrote {}", "✓".green(), path.display());
    }

    Ok(())
}

/// Print progress to stderr until the run drops its sender.
async fn print_events(mut events_rx: mpsc::Receiver<Event>, show: bool) {
    while let Some(event) = events_rx.recv().await {
        if !show {
            continue;
        }
        match event {
            Event::RunStarted { crew_name, .. } => {
                eprintln!("{} {}", "Running crew".bold(), crew_name.cyan());
            }
            Event::TaskStarted {
                task_id, agent_id, task_index, ..
            } => {
                eprintln!("  {} {} ({})", format!("[{}]", task_index + 1).dimmed(), task_id, agent_id.cyan());
            }
            Event::ToolCalled { tool, query, .. } => {
                eprintln!("      {} {}: {}", "↳".dimmed(), tool, query);
            }
            Event::TaskCompleted { task_id, .. } => {
                eprintln!("      {} {}", "✓".green(), task_id);
            }
            Event::ArtifactWritten { path, .. } => {
                eprintln!("      {} {}", "→".dimmed(), path.display());
            }
            Event::RunFailed { error, .. } => {
                eprintln!("      {} {}", "✗".red(), error);
            }
            Event::RunStatusUpdate { .. } | Event::RunLogChunk { .. } | Event::RunCompleted { .. } => {}
        }
    }
}
