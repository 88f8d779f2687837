//! Errors raised while reading `.crew-kit/` or assembling a crew from it.
//!
//! Every error here is detected before any model or tool call is made.

use ck_protocol::crew_models::ProcessMode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `config.toml` is not valid TOML for [`GlobalConfig`](ck_protocol::config_models::GlobalConfig).
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A crew file is not valid YAML or misses a required field.
    #[error("Failed to parse crew file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// An agent file has no front matter, or the front matter does not
    /// describe an agent.
    #[error("Failed to parse agent front matter in {path}: {reason}")]
    MarkdownParse { path: PathBuf, reason: String },

    #[error("Failed to list {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// The file parsed but holds a value no crew can run with.
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Agent '{0}' is defined more than once")]
    DuplicateAgent(String),

    #[error("Task '{0}' is defined more than once")]
    DuplicateTask(String),

    /// A task references an agent that has not been defined (yet).
    #[error("Task '{task_id}' references unknown agent '{agent_id}'")]
    UnknownAgent { task_id: String, agent_id: String },

    #[error("Crew '{0}' has no tasks")]
    EmptyCrew(String),

    #[error("Process mode '{0}' is not supported; use 'sequential'")]
    UnsupportedProcess(ProcessMode),

    #[error("Crew '{0}' not found")]
    CrewNotFound(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
