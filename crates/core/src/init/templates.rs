//! Embedded template files for `.crew-kit/` initialization.
//!
//! Templates live in the workspace root `templates/` directory and are
//! embedded into the binary at compile time, so `crew init` works without any
//! files next to the executable.

use rust_embed::RustEmbed;

/// Embedded template files from the workspace `templates/` directory.
///
/// `CARGO_MANIFEST_DIR` is `crates/core`, so `../../templates` is the
/// workspace root. With `debug-embed` the files are embedded in debug builds
/// too.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path relative to the templates root
/// (e.g. `"config.toml"`, `"agents/researcher.md"`).
///
/// ```
/// use ck_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("[engine]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under `prefix` (e.g. `"agents/"`), sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
