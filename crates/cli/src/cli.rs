//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run crews of role-playing agents.
#[derive(Parser, Debug)]
#[clap(
    name = "crew",
    version,
    about = "Run crews of role-playing agents defined in .crew-kit/",
    long_about = None,
    after_help = "Examples:\n\
        crew init                        Create .crew-kit/ with example agents and crews\n\
        crew list                        Show the crews of this project\n\
        crew validate research-report    Check a crew without calling the model\n\
        crew run research-report         Execute a crew\n\n\
        The model API key is read from the variable named by [llm].api-key-env\n\
        (GEMINI_API_KEY by default). Set RUST_LOG to control logging."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Project directory containing .crew-kit/
    #[clap(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .crew-kit/ directory from the built-in templates
    Init {
        /// Overwrite an existing .crew-kit/ directory
        #[clap(long)]
        force: bool,

        /// Only the researcher agent and the quick-research crew
        #[clap(long)]
        minimal: bool,
    },

    /// List the crews defined in .crew-kit/crews/
    List,

    /// Check that a crew builds: every agent resolves and every id is unique
    Validate {
        /// Crew name
        crew: String,
    },

    /// Execute a crew
    Run {
        /// Crew name
        crew: String,

        /// Directory that relative output files are written under
        #[clap(long, value_name = "DIR")]
        output_root: Option<PathBuf>,

        /// Print the final result as JSON instead of progress output
        #[clap(long)]
        json: bool,
    },
}
