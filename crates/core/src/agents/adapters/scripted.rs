//! Deterministic collaborators for testing and dry runs.

use crate::agents::base::{ModelClient, ModelError, ModelResponse, ToolError, ToolInvoker};
use async_trait::async_trait;
use ck_protocol::agent_models::{AgentDefinition, ToolKind, ToolRef};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

type Responder = dyn Fn(&AgentDefinition, &str) -> Result<ModelResponse, ModelError> + Send + Sync;

enum Script {
    Queue(Mutex<VecDeque<Result<ModelResponse, ModelError>>>),
    Repeat(ModelResponse),
    Responder(Box<Responder>),
}

/// A model client that replays scripted responses.
///
/// Every invocation is recorded so tests can inspect the exact prompts the
/// engine produced.
pub struct ScriptedModelClient {
    script: Script,
    delay: Option<Duration>,
    calls: AtomicUsize,
    invocations: Mutex<Vec<(String, String)>>,
}

impl ScriptedModelClient {
    /// Replay `responses` in invocation order. Once exhausted, every further
    /// call fails with [`ModelError::Malformed`].
    pub fn new(responses: Vec<Result<ModelResponse, ModelError>>) -> Self {
        Self::with_script(Script::Queue(Mutex::new(responses.into())))
    }

    /// Final answers, one per invocation.
    pub fn answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            answers
                .into_iter()
                .map(|a| Ok(ModelResponse::Final(a.into())))
                .collect(),
        )
    }

    /// Return the same response forever.
    pub fn repeating(response: ModelResponse) -> Self {
        Self::with_script(Script::Repeat(response))
    }

    /// Compute each response from the agent and prompt.
    pub fn responder<F>(f: F) -> Self
    where
        F: Fn(&AgentDefinition, &str) -> Result<ModelResponse, ModelError> + Send + Sync + 'static,
    {
        Self::with_script(Script::Responder(Box::new(f)))
    }

    /// Answer every prompt with `"<agent id> done"`.
    pub fn success() -> Self {
        Self::responder(|agent, _| Ok(ModelResponse::Final(format!("{} done", agent.id))))
    }

    /// Fail every call with an API error.
    pub fn failing() -> Self {
        Self::responder(|_, _| Err(ModelError::Api("scripted failure".to_string())))
    }

    /// Sleep before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: None,
            calls: AtomicUsize::new(0),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in invocation order.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.invocations)
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }

    /// `(agent id, prompt)` pairs, in invocation order.
    pub fn invocations(&self) -> Vec<(String, String)> {
        lock(&self.invocations).clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn invoke(
        &self,
        agent: &AgentDefinition,
        prompt: &str,
    ) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.invocations).push((agent.id.clone(), prompt.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.script {
            Script::Queue(queue) => lock(queue)
                .pop_front()
                .unwrap_or_else(|| Err(ModelError::Malformed("script exhausted".to_string()))),
            Script::Repeat(response) => Ok(response.clone()),
            Script::Responder(f) => f(agent, prompt),
        }
    }
}

/// A tool invoker with a fixed output per tool kind.
#[derive(Default)]
pub struct StaticToolInvoker {
    outputs: HashMap<ToolKind, Result<String, ToolError>>,
    calls: Mutex<Vec<(ToolKind, String)>>,
}

impl StaticToolInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, kind: ToolKind, output: impl Into<String>) -> Self {
        self.outputs.insert(kind, Ok(output.into()));
        self
    }

    pub fn with_failure(mut self, kind: ToolKind, error: ToolError) -> Self {
        self.outputs.insert(kind, Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// `(tool, query)` pairs, in call order.
    pub fn calls(&self) -> Vec<(ToolKind, String)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl ToolInvoker for StaticToolInvoker {
    async fn tool_call(&self, tool: &ToolRef, query: &str) -> Result<String, ToolError> {
        lock(&self.calls).push((tool.kind.clone(), query.to_string()));
        self.outputs
            .get(&tool.kind)
            .cloned()
            .unwrap_or_else(|| Err(ToolError::Unsupported(tool.kind.to_string())))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
