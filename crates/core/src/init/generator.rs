//! Directory structure and file generation for `.crew-kit/` initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Templates written in minimal mode.
const MINIMAL_TEMPLATES: &[&str] = &[
    "config.toml",
    "agents/researcher.md",
    "crews/quick-research.yaml",
];

/// Options for initializing a `.crew-kit/` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory in which `.crew-kit/` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `.crew-kit/` directory.
    pub force: bool,

    /// Only the researcher agent and the `quick-research` crew.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.crew-kit/` directory structure from the embedded templates.
///
/// ```text
/// .crew-kit/
/// ├── config.toml
/// ├── agents/
/// │   ├── researcher.md
/// │   ├── fact_checker.md (unless minimal)
/// │   └── reporting_analyst.md (unless minimal)
/// └── crews/
///     ├── research-report.yaml (unless minimal)
///     └── quick-research.yaml
/// ```
///
/// Returns the paths written, in template order.
///
/// # Errors
///
/// - `InitError::AlreadyInitialized` if `.crew-kit/` exists and `force` is unset
/// - `InitError::MissingTemplate` if a template is missing from the binary
/// - `InitError::Write` on I/O failure
pub async fn generate_crew_kit_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let ck_dir = options.target_dir.join(CONFIG_DIR);

    if ck_dir.exists() && !options.force {
        return Err(InitError::AlreadyInitialized(ck_dir));
    }

    for sub in ["agents", "crews"] {
        let path = ck_dir.join(sub);
        fs::create_dir_all(&path).map_err(|source| InitError::Write { path, source })?;
    }

    let templates: Vec<String> = if options.minimal {
        MINIMAL_TEMPLATES.iter().map(|t| t.to_string()).collect()
    } else {
        std::iter::once("config.toml".to_string())
            .chain(list_templates("agents/"))
            .chain(list_templates("crews/"))
            .collect()
    };

    let mut written = Vec::with_capacity(templates.len());
    for template in &templates {
        written.push(write_template_file(&ck_dir, template)?);
    }

    tracing::info!(path = %ck_dir.display(), files = written.len(), "initialized crew-kit directory");
    Ok(written)
}

/// Write one template under `ck_dir`, returning the written path.
fn write_template_file(ck_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::MissingTemplate(template_path.to_string()))?;

    let target_path = ck_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::Write {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
