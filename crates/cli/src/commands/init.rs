//! Init command - scaffold `.crew-kit/`

use ck_core::init::{generate_crew_kit_structure, InitOptions};
use colored::Colorize;
use color_eyre::eyre::Result;
use std::path::Path;

pub async fn run(dir: &Path, force: bool, minimal: bool) -> Result<()> {
    let written = generate_crew_kit_structure(InitOptions {
        target_dir: dir.to_path_buf(),
        force,
        minimal,
    })
    .await?;

    println!("{}", "Initialized crew-kit project".green().bold());
    for path in &written {
        let shown = path.strip_prefix(dir).unwrap_or(path);
        println!("  {} {}", "+".green(), shown.display());
    }
    println!();
    println!("Next steps:");
    println!(
        "  1. Set {} in .crew-kit/config.toml",
        "[llm].command".cyan()
    );
    println!("  2. Export your API key (GEMINI_API_KEY by default)");
    println!("  3. {}", "crew run research-report".cyan());

    Ok(())
}
