//! Agent configuration models for `.crew-kit/agents/*.md`.
//!
//! Agents are defined as Markdown files with YAML front matter. The front
//! matter carries the role metadata and tool list; the file body is the
//! agent's backstory.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Represents a named role that executes tasks in a crew.
///
/// # Example
///
/// ```markdown
/// ---
/// id: researcher
/// role: Skeptical Researcher
/// goal: Run thorough searches and verify the credibility of every source.
/// tools:
///   - search
///   - scrape
/// ---
///
/// You have spent a decade auditing sources for investigative newsrooms.
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AgentDefinition {
    /// Unique identifier for this agent within a crew.
    ///
    /// Tasks reference their agent through this id.
    pub id: String,

    /// Short role title, e.g. "Fact Checker".
    pub role: String,

    /// What the agent is trying to achieve.
    pub goal: String,

    /// Narrative background that shapes the agent's answers.
    ///
    /// Loaded from the markdown body, so it is skipped during serialization
    /// of the front matter.
    #[serde(skip)]
    pub backstory: String,

    /// Tools the agent may call, in preference order.
    #[serde(default)]
    pub tools: Vec<ToolRef>,

    /// Model override for this agent. Falls back to the global `[llm]` model.
    #[serde(default)]
    pub model: Option<String>,

    /// Per-agent tool-call budget. Falls back to `engine.max_tool_calls`.
    #[serde(default)]
    pub max_tool_calls: Option<u32>,

    /// Log every tool call and answer at info level.
    #[serde(default)]
    pub verbose: bool,
}

impl AgentDefinition {
    /// Create an agent with no tools and no overrides.
    pub fn new(
        id: impl Into<String>,
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            model: None,
            max_tool_calls: None,
            verbose: false,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolRef>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tool_calls(mut self, budget: u32) -> Self {
        self.max_tool_calls = Some(budget);
        self
    }

    /// Whether `kind` is one of this agent's tools.
    pub fn has_tool(&self, kind: &ToolKind) -> bool {
        self.tools.iter().any(|t| &t.kind == kind)
    }

    /// Find the tool reference for `kind`.
    pub fn tool(&self, kind: &ToolKind) -> Option<&ToolRef> {
        self.tools.iter().find(|t| &t.kind == kind)
    }
}

/// The kind of capability a tool provides.
///
/// Serialized as a plain lowercase string: `search`, `scrape`, or any other
/// name for custom tools.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolKind {
    /// Web search returning a list of results.
    Search,
    /// Fetches and extracts the content of a page.
    Scrape,
    /// Any other named tool provided by the host.
    Custom(String),
}

impl ToolKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Search => "search",
            Self::Scrape => "scrape",
            Self::Custom(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "search" => Self::Search,
            "scrape" => Self::Scrape,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ToolKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ToolKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(de::Error::custom("tool kind must not be empty"));
        }
        Ok(ToolKind::parse(&s))
    }
}

/// A reference to a tool held by an agent.
///
/// Accepts either a bare kind or a map with an opaque `config` value:
///
/// ```yaml
/// tools:
///   - search
///   - kind: scrape
///     config:
///       max-bytes: 65536
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "ToolRefRepr")]
pub struct ToolRef {
    pub kind: ToolKind,

    /// Tool-specific settings, passed through untouched to the invoker.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,
}

impl ToolRef {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            config: serde_json::Value::Null,
        }
    }

    pub fn search() -> Self {
        Self::new(ToolKind::Search)
    }

    pub fn scrape() -> Self {
        Self::new(ToolKind::Scrape)
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ToolRefRepr {
    Bare(ToolKind),
    Full {
        kind: ToolKind,
        #[serde(default)]
        config: serde_json::Value,
    },
}

impl From<ToolRefRepr> for ToolRef {
    fn from(repr: ToolRefRepr) -> Self {
        match repr {
            ToolRefRepr::Bare(kind) => ToolRef::new(kind),
            ToolRefRepr::Full { kind, config } => ToolRef { kind, config },
        }
    }
}
