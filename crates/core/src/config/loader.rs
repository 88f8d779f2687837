//! Configuration file loader for the `.crew-kit/` directory structure.
//!
//! This module loads and parses every configuration file under `.crew-kit/`:
//! - `config.toml`: Global settings
//! - `agents/*.md`: Agent definitions with YAML front matter
//! - `crews/*.yaml`: Crew definitions

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::config_models::GlobalConfig;
use ck_protocol::crew_models::CrewSpec;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the configuration directory under a project root.
pub const CONFIG_DIR: &str = ".crew-kit";

/// Loads all configuration from the `.crew-kit/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.crew-kit/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. Missing directories or
/// files yield defaults rather than errors. Agents and crews are returned in
/// file-name order.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML, YAML, or Markdown front matter)
/// - Two agent files or two crew files declare the same id or name
///
/// # Example
///
/// ```rust,no_run
/// use ck_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} agents", config.agents.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let ck_dir = root.join(CONFIG_DIR);

    if !ck_dir.exists() {
        tracing::debug!(path = %ck_dir.display(), "no config directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&ck_dir)?;
    let agents = load_agents(&ck_dir)?;
    let crews = load_crews(&ck_dir)?;

    tracing::debug!(
        path = %ck_dir.display(),
        agents = agents.len(),
        crews = crews.len(),
        "configuration loaded"
    );

    Ok(AppConfig {
        global,
        agents,
        crews,
    })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(ck_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = ck_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content = read_file(&config_path)?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if config.engine.call_timeout_secs == 0 {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: "engine.call-timeout-secs must be greater than zero".to_string(),
        });
    }

    Ok(config)
}

/// Loads all agent definitions from `agents/*.md`.
fn load_agents(ck_dir: &Path) -> ConfigResult<Vec<AgentDefinition>> {
    let mut agents = Vec::new();
    let mut seen = HashSet::new();

    for path in files_with_extension(&ck_dir.join("agents"), &["md"])? {
        let agent = parse_agent_file(&path)?;
        if !seen.insert(agent.id.clone()) {
            return Err(ConfigError::DuplicateAgent(agent.id));
        }
        agents.push(agent);
    }

    Ok(agents)
}

/// Parses one agent file: front matter into the definition, body into the
/// backstory.
fn parse_agent_file(path: &Path) -> ConfigResult<AgentDefinition> {
    let content = read_file(path)?;

    let matter = Matter::<YAML>::new();
    let result = matter.parse(&content);

    let mut agent: AgentDefinition = result
        .data
        .ok_or_else(|| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Missing YAML front matter".to_string(),
        })?
        .deserialize()
        .map_err(|e| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: format!("Failed to deserialize front matter: {}", e),
        })?;

    if agent.id.trim().is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "agent id must not be empty".to_string(),
        });
    }

    agent.backstory = result.content.trim().to_string();

    Ok(agent)
}

/// Loads all crew definitions from `crews/*.yaml` and `crews/*.yml`.
fn load_crews(ck_dir: &Path) -> ConfigResult<Vec<CrewSpec>> {
    let mut crews = Vec::new();
    let mut seen = HashSet::new();

    for path in files_with_extension(&ck_dir.join("crews"), &["yaml", "yml"])? {
        let content = read_file(&path)?;

        let crew: CrewSpec =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.clone(),
                source,
            })?;

        if !seen.insert(crew.name.clone()) {
            return Err(ConfigError::InvalidConfig {
                path,
                reason: format!("crew '{}' is defined more than once", crew.name),
            });
        }

        crews.push(crew);
    }

    Ok(crews)
}

/// Lists the files directly inside `dir` whose extension is in `extensions`,
/// sorted by file name. A missing directory yields an empty list.
fn files_with_extension(dir: &Path, extensions: &[&str]) -> ConfigResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| extensions.contains(&ext));

        if entry.file_type().is_file() && matches {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn read_file(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_protocol::agent_models::ToolKind;
    use ck_protocol::crew_models::ProcessMode;
    use std::fs;
    use tempfile::tempdir;

    fn ck_dir(root: &Path) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(dir.join("agents")).expect("Failed to create agents dir");
        fs::create_dir_all(dir.join("crews")).expect("Failed to create crews dir");
        dir
    }

    #[tokio::test]
    async fn test_load_config_acceptance() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let ck = ck_dir(root);

        let config_toml = r#"
[llm]
model = "gemini/gemini-1.5-flash"
temperature = 0.2
command = "crew-gemini"

[tools]
search = { program = "crew-search", args = ["--max", "5"] }

[engine]
max-tool-calls = 4
"#;
        fs::write(ck.join("config.toml"), config_toml).expect("Failed to write config.toml");

        let agent_md = r#"---
id: researcher
role: Skeptical Researcher
goal: Verify every source
tools:
  - search
  - kind: scrape
    config:
      max-pages: 3
---

You have audited sources for a decade.
"#;
        fs::write(ck.join("agents/researcher.md"), agent_md).expect("Failed to write agent file");

        let crew_yaml = r#"name: research-report
description: Research and report
tasks:
  - id: research_task
    agent: researcher
    description: Research the topic
    expected-output: Verified findings
    output-file: results/findings.md
"#;
        fs::write(ck.join("crews/research-report.yaml"), crew_yaml)
            .expect("Failed to write crew file");

        let config = load_config(root).await.expect("Failed to load config");

        assert_eq!(config.global.llm.model, "gemini/gemini-1.5-flash");
        assert_eq!(config.global.engine.max_tool_calls, 4);
        assert_eq!(
            config.global.tool_command(&ToolKind::Search).unwrap().program,
            "crew-search"
        );

        assert_eq!(config.agents.len(), 1);
        let agent = &config.agents[0];
        assert_eq!(agent.id, "researcher");
        assert_eq!(agent.role, "Skeptical Researcher");
        assert_eq!(agent.backstory, "You have audited sources for a decade.");
        assert!(agent.has_tool(&ToolKind::Search));
        assert_eq!(
            agent.tool(&ToolKind::Scrape).unwrap().config["max-pages"],
            3
        );

        assert_eq!(config.crews.len(), 1);
        let crew = &config.crews[0];
        assert_eq!(crew.name, "research-report");
        assert_eq!(crew.process, ProcessMode::Sequential);
        assert_eq!(
            crew.tasks[0].output_file.as_deref(),
            Some(Path::new("results/findings.md"))
        );
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config(dir.path())
            .await
            .expect("Should handle missing .crew-kit");

        assert_eq!(config.global, GlobalConfig::default());
        assert!(config.agents.is_empty());
        assert!(config.crews.is_empty());
    }

    #[tokio::test]
    async fn test_load_config_partial() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&ck).expect("Failed to create .crew-kit");
        fs::write(ck.join("config.toml"), "[engine]\nmax-tool-calls = 2\n")
            .expect("Failed to write config.toml");

        let config = load_config(dir.path())
            .await
            .expect("Should handle partial config");

        assert_eq!(config.global.engine.max_tool_calls, 2);
        assert_eq!(config.global.engine.call_timeout_secs, 120);
        assert!(config.agents.is_empty());
        assert!(config.crews.is_empty());
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        fs::write(ck.join("config.toml"), "[llm\nmodel = ").expect("Failed to write config.toml");

        match load_config(dir.path()).await {
            Err(ConfigError::TomlParse { path, .. }) => assert!(path.ends_with("config.toml")),
            other => panic!("Expected TomlParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_config_zero_timeout_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        fs::write(ck.join("config.toml"), "[engine]\ncall-timeout-secs = 0\n")
            .expect("Failed to write config.toml");

        let result = load_config(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::InvalidConfig { .. })));
    }

    #[tokio::test]
    async fn test_load_config_invalid_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        fs::write(ck.join("crews/test.yaml"), "name: test\n  tasks: [yaml")
            .expect("Failed to write crew file");

        match load_config(dir.path()).await {
            Err(ConfigError::YamlParse { path, .. }) => assert!(path.ends_with("test.yaml")),
            other => panic!("Expected YamlParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_config_agent_no_frontmatter() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        fs::write(ck.join("agents/test.md"), "Just plain markdown content")
            .expect("Failed to write agent file");

        match load_config(dir.path()).await {
            Err(ConfigError::MarkdownParse { path, reason }) => {
                assert!(path.ends_with("test.md"));
                assert!(reason.contains("Missing YAML front matter"));
            }
            other => panic!("Expected MarkdownParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_config_agent_missing_fields() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        let agent_md = "---\nid: test-agent\n# role and goal missing\n---\n\nBackstory";
        fs::write(ck.join("agents/test.md"), agent_md).expect("Failed to write agent file");

        match load_config(dir.path()).await {
            Err(ConfigError::MarkdownParse { path, reason }) => {
                assert!(path.ends_with("test.md"));
                assert!(reason.contains("Failed to deserialize"));
            }
            other => panic!("Expected MarkdownParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_config_duplicate_agent_ids() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());
        let agent_md = "---\nid: writer\nrole: Writer\ngoal: Write\n---\n\nStory";
        fs::write(ck.join("agents/a.md"), agent_md).expect("Failed to write agent file");
        fs::write(ck.join("agents/b.md"), agent_md).expect("Failed to write agent file");

        let result = load_config(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::DuplicateAgent(id)) if id == "writer"));
    }

    #[tokio::test]
    async fn test_load_config_sorted_and_filtered() {
        let dir = tempdir().expect("Failed to create temp dir");
        let ck = ck_dir(dir.path());

        for id in ["charlie", "alpha", "bravo"] {
            let agent_md = format!("---\nid: {id}\nrole: R\ngoal: G\n---\n\nStory of {id}");
            fs::write(ck.join(format!("agents/{id}.md")), agent_md)
                .expect("Failed to write agent file");
        }
        fs::write(ck.join("agents/readme.txt"), "Not a markdown file")
            .expect("Failed to write txt file");
        fs::write(ck.join("crews/notes.txt"), "Not a yaml file").expect("Failed to write txt file");
        fs::write(
            ck.join("crews/short.yml"),
            "name: short\ntasks:\n  - id: t\n    agent: alpha\n    description: d\n    expected-output: e\n",
        )
        .expect("Failed to write crew file");

        let config = load_config(dir.path()).await.expect("Should load");

        let ids: Vec<_> = config.agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
        assert_eq!(config.crews.len(), 1);
        assert_eq!(config.crews[0].name, "short");
    }
}
