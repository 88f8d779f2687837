//! Collaborator traits and the events an agent produces while working.
//!
//! A crew never talks to a language model or a tool directly. It goes through
//! two injected collaborators:
//! - [`ModelClient`]: answers a prompt on behalf of an agent, either with a
//!   final answer or with a request to call one of the agent's tools
//! - [`ToolInvoker`]: runs a tool with a query and returns its text output

use async_trait::async_trait;
use ck_protocol::agent_models::{AgentDefinition, ToolKind, ToolRef};
use std::time::Duration;
use thiserror::Error;

/// What a model returned for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelResponse {
    /// The agent's answer for the task.
    Final(String),
    /// The agent wants to run a tool before answering.
    ToolCall { tool: ToolKind, query: String },
}

impl ModelResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Final(text.into())
    }

    pub fn tool_call(tool: ToolKind, query: impl Into<String>) -> Self {
        Self::ToolCall {
            tool,
            query: query.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
    #[error("model quota exhausted: {0}")]
    Quota(String),
    #[error("malformed model response: {0}")]
    Malformed(String),
    #[error("model API error: {0}")]
    Api(String),
    #[error("model client unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("tool '{tool}' timed out after {after:?}")]
    Timeout { tool: String, after: Duration },
    #[error("no implementation for tool '{0}'")]
    Unsupported(String),
    #[error("tool '{tool}' failed: {reason}")]
    Failed { tool: String, reason: String },
}

/// Language-model backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Answer `prompt` in the voice of `agent`.
    async fn invoke(
        &self,
        agent: &AgentDefinition,
        prompt: &str,
    ) -> Result<ModelResponse, ModelError>;
}

/// Tool backend.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn tool_call(&self, tool: &ToolRef, query: &str) -> Result<String, ToolError>;
}

/// Progress reported by an agent while it works on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// The agent asked for a tool.
    ToolCall { tool: ToolKind, query: String },
    /// The tool answered.
    ToolResult { tool: ToolKind, output: String },
    /// The agent's final answer.
    MessageChunk(String),
    Completed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("agent '{agent}' requested tool '{tool}' which it does not hold")]
    ToolNotAssigned { agent: String, tool: String },
    #[error("agent '{agent}' exceeded its budget of {budget} tool calls")]
    ToolBudgetExceeded { agent: String, budget: u32 },
    #[error("agent '{0}' finished without an answer")]
    NoAnswer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoModel;

    #[async_trait]
    impl ModelClient for EchoModel {
        async fn invoke(
            &self,
            agent: &AgentDefinition,
            prompt: &str,
        ) -> Result<ModelResponse, ModelError> {
            if prompt.is_empty() {
                return Err(ModelError::Malformed("empty prompt".to_string()));
            }
            Ok(ModelResponse::text(format!("{}: {}", agent.id, prompt)))
        }
    }

    #[tokio::test]
    async fn test_model_client_object_safety() {
        let client: Box<dyn ModelClient> = Box::new(EchoModel);
        let agent = AgentDefinition::new("writer", "Writer", "Write", "");

        let reply = client.invoke(&agent, "hello").await.unwrap();
        assert_eq!(reply, ModelResponse::Final("writer: hello".to_string()));

        let err = client.invoke(&agent, "").await.unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn test_agent_error_wraps_collaborator_errors() {
        let err: AgentError = ModelError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(err.to_string(), "model call timed out after 30s");

        let err = ToolError::Timeout {
            tool: "search".to_string(),
            after: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "tool 'search' timed out after 250ms");

        let err: AgentError = ToolError::Unsupported("scrape".to_string()).into();
        assert!(matches!(err, AgentError::Tool(ToolError::Unsupported(_))));
    }
}
