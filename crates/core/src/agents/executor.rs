//! Drives one agent through one task.
//!
//! The executor alternates between the model and the agent's tools until the
//! model produces a final answer. Every external call is bounded by the call
//! timeout, and the number of tool calls per task is bounded by the agent's
//! budget.

use crate::agents::base::{
    AgentError, AgentEvent, ModelClient, ModelError, ModelResponse, ToolError, ToolInvoker,
};
use ck_protocol::agent_models::{AgentDefinition, ToolKind};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_stream::{Stream, StreamExt};

pub type AgentEventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent, AgentError>> + Send>>;

pub const DEFAULT_MAX_TOOL_CALLS: u32 = 8;
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs agents against the injected model and tool collaborators.
#[derive(Clone)]
pub struct AgentExecutor {
    model: Arc<dyn ModelClient>,
    tools: Arc<dyn ToolInvoker>,
    max_tool_calls: u32,
    call_timeout: Duration,
}

impl AgentExecutor {
    pub fn new(model: Arc<dyn ModelClient>, tools: Arc<dyn ToolInvoker>) -> Self {
        Self {
            model,
            tools,
            max_tool_calls: DEFAULT_MAX_TOOL_CALLS,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Default tool-call budget for agents that do not set their own.
    pub fn with_max_tool_calls(mut self, max_tool_calls: u32) -> Self {
        self.max_tool_calls = max_tool_calls;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// The budget that applies to `agent`.
    pub fn budget_for(&self, agent: &AgentDefinition) -> u32 {
        agent.max_tool_calls.unwrap_or(self.max_tool_calls)
    }

    /// Execute `prompt` as `agent`.
    ///
    /// The returned stream yields zero or more `ToolCall`/`ToolResult` pairs,
    /// then `MessageChunk` with the final answer and `Completed`. Any failure
    /// is yielded as the last item.
    pub fn execute(&self, agent: Arc<AgentDefinition>, prompt: String) -> AgentEventStream {
        let model = Arc::clone(&self.model);
        let tools = Arc::clone(&self.tools);
        let budget = self.budget_for(&agent);
        let call_timeout = self.call_timeout;

        let stream = async_stream::stream! {
            let mut prompt = prompt;
            let mut calls_made: u32 = 0;

            loop {
                let reply = match timeout(call_timeout, model.invoke(&agent, &prompt)).await {
                    Ok(Ok(reply)) => reply,
                    Ok(Err(e)) => {
                        yield Err(AgentError::Model(e));
                        return;
                    }
                    Err(_) => {
                        yield Err(AgentError::Model(ModelError::Timeout(call_timeout)));
                        return;
                    }
                };

                match reply {
                    ModelResponse::Final(text) => {
                        if agent.verbose {
                            tracing::info!(agent = %agent.id, "final answer ready");
                        }
                        yield Ok(AgentEvent::MessageChunk(text));
                        yield Ok(AgentEvent::Completed);
                        return;
                    }
                    ModelResponse::ToolCall { tool, query } => {
                        let tool_ref = match agent.tool(&tool) {
                            Some(tool_ref) => tool_ref.clone(),
                            None => {
                                yield Err(AgentError::ToolNotAssigned {
                                    agent: agent.id.clone(),
                                    tool: tool.to_string(),
                                });
                                return;
                            }
                        };

                        if calls_made >= budget {
                            tracing::warn!(agent = %agent.id, budget, "tool budget exhausted");
                            yield Err(AgentError::ToolBudgetExceeded {
                                agent: agent.id.clone(),
                                budget,
                            });
                            return;
                        }
                        calls_made += 1;

                        if agent.verbose {
                            tracing::info!(agent = %agent.id, tool = %tool, query = %query, "calling tool");
                        } else {
                            tracing::debug!(agent = %agent.id, tool = %tool, "calling tool");
                        }
                        yield Ok(AgentEvent::ToolCall {
                            tool: tool.clone(),
                            query: query.clone(),
                        });

                        let output = match timeout(call_timeout, tools.tool_call(&tool_ref, &query)).await {
                            Ok(Ok(output)) => output,
                            Ok(Err(e)) => {
                                yield Err(AgentError::Tool(e));
                                return;
                            }
                            Err(_) => {
                                yield Err(AgentError::Tool(ToolError::Timeout {
                                    tool: tool.to_string(),
                                    after: call_timeout,
                                }));
                                return;
                            }
                        };

                        prompt = append_observation(&prompt, &tool, &query, &output);
                        yield Ok(AgentEvent::ToolResult { tool, output });
                    }
                }
            }
        };

        Box::pin(stream)
    }

    /// Execute and collect the final answer, discarding progress events.
    pub async fn answer(
        &self,
        agent: Arc<AgentDefinition>,
        prompt: String,
    ) -> Result<String, AgentError> {
        let agent_id = agent.id.clone();
        let mut stream = self.execute(agent, prompt);
        let mut answer = None;

        while let Some(event) = stream.next().await {
            match event? {
                AgentEvent::MessageChunk(text) => answer = Some(text),
                AgentEvent::Completed => break,
                AgentEvent::ToolCall { .. } | AgentEvent::ToolResult { .. } => {}
            }
        }

        answer.ok_or(AgentError::NoAnswer(agent_id))
    }
}

/// Feed a tool's output back to the model as part of the next prompt.
fn append_observation(prompt: &str, tool: &ToolKind, query: &str, output: &str) -> String {
    format!("{prompt}\n\nTool `{tool}` was called with query \"{query}\" and returned:\n{output}")
}
