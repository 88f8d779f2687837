//! Command handlers.

pub mod init;
pub mod list;
pub mod run;
pub mod validate;

use ck_core::config::loader::{load_config, CONFIG_DIR};
use ck_core::config::models::AppConfig;
use color_eyre::eyre::{eyre, Result};
use std::path::Path;

/// Load `.crew-kit/` under `dir`, failing with a hint when it is missing.
pub(crate) async fn load_project(dir: &Path) -> Result<AppConfig> {
    let ck_dir = dir.join(CONFIG_DIR);
    if !ck_dir.exists() {
        return Err(eyre!(
            "No {} directory found in {}\n\n\
             Run 'crew init' to create one.",
            CONFIG_DIR,
            dir.display()
        ));
    }

    let config = load_config(dir).await?;
    tracing::debug!(
        crews = config.crews.len(),
        agents = config.agents.len(),
        "loaded {}",
        ck_dir.display()
    );
    Ok(config)
}
