//! Model client backed by an external command.
//!
//! The command receives one JSON request on stdin:
//!
//! ```json
//! {"model":"gemini/gemini-1.5-pro","temperature":0.5,
//!  "agent":{"id":"researcher","role":"...","goal":"...","backstory":"..."},
//!  "tools":["search","scrape"],"prompt":"..."}
//! ```
//!
//! and answers with JSON Lines on stdout. `{"text": ...}` lines are
//! concatenated into the final answer; a `{"tool": ..., "query": ...}` line
//! requests a tool call; an `{"error": ...}` line fails the call, and so does
//! a non-zero exit, even after text was printed.

use crate::agents::base::{ModelClient, ModelError, ModelResponse};
use crate::agents::cli_executor::{CliExecutor, CommandError};
use crate::config::credentials::ApiKey;
use async_trait::async_trait;
use ck_protocol::agent_models::{AgentDefinition, ToolKind};
use ck_protocol::config_models::{CommandSettings, LlmSettings};
use serde::Serialize;
use tokio_stream::StreamExt;

pub struct CommandModelClient {
    command: CommandSettings,
    model: String,
    temperature: f32,
    api_key_env: String,
    api_key: ApiKey,
}

impl CommandModelClient {
    pub fn new(command: CommandSettings, llm: &LlmSettings, api_key: ApiKey) -> Self {
        Self {
            command,
            model: llm.model.clone(),
            temperature: llm.temperature,
            api_key_env: llm.api_key_env.clone(),
            api_key,
        }
    }

    pub fn is_available(&self) -> bool {
        CliExecutor::is_available(&self.command)
    }

    fn request(&self, agent: &AgentDefinition, prompt: &str) -> Result<String, ModelError> {
        let request = ModelRequest {
            model: agent.model.as_deref().unwrap_or(&self.model),
            temperature: self.temperature,
            agent: AgentPayload {
                id: &agent.id,
                role: &agent.role,
                goal: &agent.goal,
                backstory: &agent.backstory,
            },
            tools: agent.tools.iter().map(|t| t.kind.as_str()).collect(),
            prompt,
        };
        serde_json::to_string(&request)
            .map_err(|e| ModelError::Malformed(format!("failed to serialize request: {e}")))
    }
}

#[derive(Serialize)]
struct ModelRequest<'a> {
    model: &'a str,
    temperature: f32,
    agent: AgentPayload<'a>,
    tools: Vec<&'a str>,
    prompt: &'a str,
}

#[derive(Serialize)]
struct AgentPayload<'a> {
    id: &'a str,
    role: &'a str,
    goal: &'a str,
    backstory: &'a str,
}

#[async_trait]
impl ModelClient for CommandModelClient {
    async fn invoke(
        &self,
        agent: &AgentDefinition,
        prompt: &str,
    ) -> Result<ModelResponse, ModelError> {
        let request = self.request(agent, prompt)?;
        let envs = vec![(
            self.api_key_env.clone(),
            self.api_key.expose().to_string(),
        )];

        tracing::debug!(agent = %agent.id, program = %self.command.program, "invoking model command");
        let mut lines = CliExecutor::execute_json_lines(self.command.clone(), request, envs);
        let mut text: Option<String> = None;

        while let Some(line) = lines.next().await {
            let value = line.map_err(|e| match e {
                CommandError::Spawn { .. } => ModelError::Unavailable(e.to_string()),
                CommandError::ExitStatus { .. } => ModelError::Api(e.to_string()),
                other => ModelError::Malformed(other.to_string()),
            })?;

            match interpret_line(&value)? {
                Some(LineKind::Text(chunk)) => text.get_or_insert_with(String::new).push_str(&chunk),
                Some(LineKind::Tool(response)) => return Ok(response),
                None => {}
            }
        }

        text.map(ModelResponse::Final)
            .ok_or_else(|| ModelError::Malformed("command produced no answer".to_string()))
    }
}

enum LineKind {
    Text(String),
    Tool(ModelResponse),
}

fn interpret_line(value: &serde_json::Value) -> Result<Option<LineKind>, ModelError> {
    if let Some(error) = value.get("error") {
        let message = error
            .as_str()
            .or_else(|| error.get("message").and_then(serde_json::Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        let code = value
            .get("code")
            .or_else(|| error.get("code"))
            .and_then(serde_json::Value::as_i64);
        let lowered = message.to_lowercase();
        let is_quota = code == Some(429)
            || lowered.contains("quota")
            || lowered.contains("resource has been exhausted");
        return Err(if is_quota {
            ModelError::Quota(message)
        } else {
            ModelError::Api(message)
        });
    }

    if let Some(tool) = value.get("tool").and_then(serde_json::Value::as_str) {
        let query = value
            .get("query")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ModelError::Malformed(format!("tool request without query: {value}")))?;
        return Ok(Some(LineKind::Tool(ModelResponse::tool_call(
            ToolKind::parse(tool),
            query,
        ))));
    }

    Ok(value
        .get("text")
        .and_then(serde_json::Value::as_str)
        .map(|t| LineKind::Text(t.to_string())))
}
