//! crew - run crews of role-playing agents defined in `.crew-kit/`.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "crew=debug,ck_core=debug"
    } else {
        "crew=info,ck_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Init { force, minimal } => commands::init::run(&cli.dir, force, minimal).await,
        Commands::List => commands::list::run(&cli.dir).await,
        Commands::Validate { crew } => commands::validate::run(&cli.dir, &crew).await,
        Commands::Run {
            crew,
            output_root,
            json,
        } => commands::run::run(&cli.dir, &crew, output_root, json).await,
    }
}
