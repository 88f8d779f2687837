//! Factory for building the collaborators described by `config.toml`.

use crate::agents::adapters::{CommandModelClient, CommandToolInvoker};
use crate::agents::base::{ModelClient, ToolInvoker};
use crate::agents::executor::AgentExecutor;
use crate::config::credentials::ApiKey;
use anyhow::{bail, Result};
use ck_protocol::agent_models::ToolKind;
use ck_protocol::config_models::GlobalConfig;
use std::sync::Arc;
use std::time::Duration;

/// Builds model and tool collaborators from the global configuration.
pub struct ClientFactory;

impl ClientFactory {
    /// Create the model client.
    ///
    /// # Errors
    ///
    /// Fails if `[llm].command` is not configured or the program cannot be
    /// found on `PATH`.
    pub fn model_client(config: &GlobalConfig, api_key: ApiKey) -> Result<Arc<dyn ModelClient>> {
        let Some(command) = config.llm.command.clone() else {
            bail!("no model command configured; set [llm].command in .crew-kit/config.toml");
        };

        let program = command.program.clone();
        let client = CommandModelClient::new(command, &config.llm, api_key);
        if !client.is_available() {
            bail!("model command '{program}' was not found on PATH");
        }
        Ok(Arc::new(client))
    }

    /// Create the tool invoker from every `[tools.<kind>]` table.
    ///
    /// Tools without a configured command fail at call time with
    /// `ToolError::Unsupported`.
    pub fn tool_invoker(config: &GlobalConfig) -> Arc<dyn ToolInvoker> {
        let invoker = config
            .tools
            .iter()
            .fold(CommandToolInvoker::new(), |invoker, (kind, command)| {
                invoker.with_command(ToolKind::parse(kind), command.clone())
            });
        Arc::new(invoker)
    }

    /// Create an executor with the engine limits from `config`.
    pub fn executor(
        config: &GlobalConfig,
        model: Arc<dyn ModelClient>,
        tools: Arc<dyn ToolInvoker>,
    ) -> AgentExecutor {
        AgentExecutor::new(model, tools)
            .with_max_tool_calls(config.engine.max_tool_calls)
            .with_call_timeout(Duration::from_secs(config.engine.call_timeout_secs))
    }
}
