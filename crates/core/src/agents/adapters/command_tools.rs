//! Tool invoker backed by one external command per tool kind.
//!
//! Each tool command is run with the query as its last argument; its stdout
//! is the tool's output.

use crate::agents::base::{ToolError, ToolInvoker};
use crate::agents::cli_executor::CliExecutor;
use async_trait::async_trait;
use ck_protocol::agent_models::{ToolKind, ToolRef};
use ck_protocol::config_models::CommandSettings;
use std::collections::HashMap;

#[derive(Default)]
pub struct CommandToolInvoker {
    commands: HashMap<ToolKind, CommandSettings>,
}

impl CommandToolInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, kind: ToolKind, command: CommandSettings) -> Self {
        self.commands.insert(kind, command);
        self
    }

    /// Tool kinds that have a command configured.
    pub fn kinds(&self) -> Vec<&ToolKind> {
        let mut kinds: Vec<_> = self.commands.keys().collect();
        kinds.sort();
        kinds
    }
}

#[async_trait]
impl ToolInvoker for CommandToolInvoker {
    async fn tool_call(&self, tool: &ToolRef, query: &str) -> Result<String, ToolError> {
        let command = self
            .commands
            .get(&tool.kind)
            .ok_or_else(|| ToolError::Unsupported(tool.kind.to_string()))?;

        // Opaque tool config travels to the command as JSON.
        let mut envs = Vec::new();
        if !tool.config.is_null() {
            envs.push(("CREW_TOOL_CONFIG".to_string(), tool.config.to_string()));
        }

        tracing::debug!(tool = %tool.kind, program = %command.program, "invoking tool command");
        CliExecutor::execute_text(command, query, envs)
            .await
            .map_err(|e| ToolError::Failed {
                tool: tool.kind.to_string(),
                reason: e.to_string(),
            })
    }
}
