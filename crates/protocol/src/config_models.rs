//! Global configuration models for `.crew-kit/config.toml`.
//!
//! This module defines the project-wide settings that apply to every crew:
//! which model backs the agents, which commands implement the tools, and the
//! engine's limits.

use crate::agent_models::ToolKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Represents global settings from `.crew-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// [llm]
/// model = "gemini/gemini-1.5-pro"
/// temperature = 0.5
/// api-key-env = "GEMINI_API_KEY"
/// command = "crew-llm"
///
/// [tools]
/// search = "crew-search"
/// scrape = { program = "crew-scrape", args = ["--text"] }
///
/// [engine]
/// max-tool-calls = 8
/// call-timeout-secs = 120
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    #[serde(default)]
    pub llm: LlmSettings,

    /// Commands implementing each tool kind, keyed by kind name.
    #[serde(default)]
    pub tools: BTreeMap<String, CommandSettings>,

    #[serde(default)]
    pub engine: EngineSettings,
}

impl GlobalConfig {
    /// The command configured for `kind`, if any.
    pub fn tool_command(&self, kind: &ToolKind) -> Option<&CommandSettings> {
        self.tools.get(kind.as_str())
    }
}

/// The language model shared by every agent unless an agent overrides it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Environment variable holding the model API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Command that answers model requests. When absent the CLI cannot run
    /// crews, only validate them.
    #[serde(default)]
    pub command: Option<CommandSettings>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            command: None,
        }
    }
}

/// An external program and its fixed arguments.
///
/// Accepts a bare string (`command = "crew-llm"`) or a table with `program`
/// and `args`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "CommandRepr")]
pub struct CommandSettings {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSettings {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommandRepr {
    Program(String),
    Full {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl From<CommandRepr> for CommandSettings {
    fn from(repr: CommandRepr) -> Self {
        match repr {
            CommandRepr::Program(program) => CommandSettings::new(program),
            CommandRepr::Full { program, args } => CommandSettings { program, args },
        }
    }
}

/// Limits applied by the crew engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct EngineSettings {
    /// Upper bound on tool calls an agent may make for one task.
    #[serde(default = "default_max_tool_calls")]
    pub max_tool_calls: u32,

    /// Timeout for a single model or tool call, in seconds.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Directory that relative `output-file` paths resolve against.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_tool_calls: default_max_tool_calls(),
            call_timeout_secs: default_call_timeout_secs(),
            output_root: default_output_root(),
        }
    }
}

fn default_model() -> String {
    "gemini/gemini-1.5-pro".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_tool_calls() -> u32 {
    8
}

fn default_call_timeout_secs() -> u64 {
    120
}

fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
