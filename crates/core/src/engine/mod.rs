//! Crew execution engine.
//!
//! The CrewEngine executes a crew's tasks sequentially. Each task is handed to
//! its agent together with every earlier answer, and answers bound to an
//! output file are written to disk as soon as they are produced.

use crate::agents::base::{AgentError, AgentEvent};
use crate::agents::executor::{AgentEventStream, AgentExecutor};
use crate::crew::{build_prompt, Crew, ExecutionContext};
use crate::state::run::{
    advance_task, complete_run, create_run, fail_run, log_to_run, start_run,
};
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::events::Event;
use ck_protocol::run_models::Run;
use ck_protocol::task_models::{FinalResult, TaskDefinition, TaskOutput};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;

/// Why a single task failed.
#[derive(Error, Debug)]
pub enum StepError {
    /// The task's agent is not in the crew's registry.
    #[error("agent '{0}' is not defined in this crew")]
    UnresolvedAgent(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The answer was produced but its output file could not be written.
    #[error("failed to write {path}: {source}")]
    SinkWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A run that stopped at its first failing task.
#[derive(Error, Debug)]
#[error("task '{task_id}' failed: {cause}")]
pub struct RunError {
    pub task_id: String,
    #[source]
    pub cause: StepError,
    /// Outputs of the tasks that finished before the failure, in order.
    pub completed: Vec<TaskOutput>,
}

/// The main crew execution engine.
///
/// The engine keeps no per-run state, so `run` may be called concurrently
/// from several tasks sharing one engine.
#[derive(Clone)]
pub struct CrewEngine {
    executor: AgentExecutor,
    output_root: PathBuf,
}

impl CrewEngine {
    /// Create an engine that writes output files relative to the current
    /// directory.
    pub fn new(executor: AgentExecutor) -> Self {
        Self {
            executor,
            output_root: PathBuf::from("."),
        }
    }

    /// Resolve relative output files against `root`.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Where a task's `output_file` lands on disk.
    pub fn resolve_output(&self, output_file: &Path) -> PathBuf {
        if output_file.is_absolute() {
            output_file.to_path_buf()
        } else {
            self.output_root.join(output_file)
        }
    }

    /// Execute a crew and return every task's answer.
    ///
    /// This is the main entry point for crew execution. It:
    /// 1. Creates a new Run and emits `RunStarted`
    /// 2. Executes each task in order, feeding it all earlier answers
    /// 3. Writes each answer that has an output file
    /// 4. Emits `RunCompleted`, or `RunFailed` at the first failure
    ///
    /// # Arguments
    ///
    /// * `crew` - The validated crew to execute
    /// * `events_tx` - Channel for progress events; a closed receiver is ignored
    ///
    /// # Errors
    ///
    /// Returns a `RunError` naming the first failing task. No later task is
    /// executed. If the failure was writing an output file, that task's answer
    /// is included in `completed`.
    pub async fn run(&self, crew: &Crew, events_tx: Sender<Event>) -> Result<FinalResult, RunError> {
        let mut run = create_run(crew.name());
        let mut context = ExecutionContext::new();
        let mut written_artifacts = Vec::new();

        tracing::info!(run_id = %run.id, crew = %crew.name(), tasks = crew.tasks().len(), "run started");
        start_run(&mut run, &events_tx).await;

        for (index, task) in crew.tasks().iter().enumerate() {
            advance_task(&mut run, index);

            let step = self
                .run_task(&mut run, crew, task, &mut context, &events_tx)
                .await;

            match step {
                Ok(Some(path)) => written_artifacts.push(path),
                Ok(None) => {}
                Err(cause) => {
                    tracing::error!(run_id = %run.id, task = %task.id, error = %cause, "task failed");
                    fail_run(&mut run, &events_tx, &task.id, cause.to_string()).await;
                    return Err(RunError {
                        task_id: task.id.clone(),
                        cause,
                        completed: context.into_outputs(),
                    });
                }
            }
        }

        complete_run(&mut run, &events_tx).await;
        tracing::info!(run_id = %run.id, crew = %crew.name(), "run completed");

        Ok(FinalResult {
            per_task_results: context.into_outputs(),
            written_artifacts,
        })
    }

    /// Execute one task, record its answer and write its output file.
    ///
    /// Returns the path written, if any.
    async fn run_task(
        &self,
        run: &mut Run,
        crew: &Crew,
        task: &TaskDefinition,
        context: &mut ExecutionContext,
        events_tx: &Sender<Event>,
    ) -> Result<Option<PathBuf>, StepError> {
        let agent = crew
            .agent_for(task)
            .ok_or_else(|| StepError::UnresolvedAgent(task.agent_id.clone()))?;

        let _ = events_tx
            .send(Event::TaskStarted {
                run_id: run.id,
                task_id: task.id.clone(),
                agent_id: agent.id.clone(),
                task_index: run.current_task,
            })
            .await;
        log_to_run(
            run,
            events_tx,
            format!("Executing task {} with agent {}", task.id, agent.id),
        )
        .await;

        let prompt = build_prompt(&agent, task, context);
        let text = self.execute_agent(run, agent, task, prompt, events_tx).await?;

        context.push(TaskOutput {
            task_id: task.id.clone(),
            agent_id: task.agent_id.clone(),
            text: text.clone(),
        });
        let _ = events_tx
            .send(Event::TaskCompleted {
                run_id: run.id,
                task_id: task.id.clone(),
                task_index: run.current_task,
            })
            .await;

        let Some(output_file) = &task.output_file else {
            return Ok(None);
        };

        let path = self.write_output(output_file, &text).await?;
        tracing::info!(run_id = %run.id, task = %task.id, path = %path.display(), "output written");
        let _ = events_tx
            .send(Event::ArtifactWritten {
                run_id: run.id,
                task_id: task.id.clone(),
                path: path.clone(),
            })
            .await;

        Ok(Some(path))
    }

    /// Run the agent on `prompt` and return its answer.
    async fn execute_agent(
        &self,
        run: &mut Run,
        agent: Arc<AgentDefinition>,
        task: &TaskDefinition,
        prompt: String,
        events_tx: &Sender<Event>,
    ) -> Result<String, StepError> {
        let agent_id = agent.id.clone();
        let verbose = agent.verbose;
        let stream = self.executor.execute(agent, prompt);
        drain_agent_events(run, &agent_id, verbose, task, stream, events_tx).await
    }

    /// Write `text` to the resolved output path, replacing any existing file.
    async fn write_output(&self, output_file: &Path, text: &str) -> Result<PathBuf, StepError> {
        let path = self.resolve_output(output_file);
        let sink_error = |source| StepError::SinkWrite {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(sink_error)?;
        }
        tokio::fs::write(&path, text).await.map_err(sink_error)?;

        Ok(path)
    }
}

/// Forward an agent's progress as run events until it completes.
///
/// A stream that ends without a `MessageChunk` fails with
/// [`AgentError::NoAnswer`].
async fn drain_agent_events(
    run: &mut Run,
    agent_id: &str,
    verbose: bool,
    task: &TaskDefinition,
    mut stream: AgentEventStream,
    events_tx: &Sender<Event>,
) -> Result<String, StepError> {
    let mut answer: Option<String> = None;

    while let Some(event_result) = stream.next().await {
        match event_result? {
            AgentEvent::ToolCall { tool, query } => {
                if verbose {
                    tracing::info!(task = %task.id, %tool, %query, "tool call");
                } else {
                    tracing::debug!(task = %task.id, %tool, %query, "tool call");
                }
                let _ = events_tx
                    .send(Event::ToolCalled {
                        run_id: run.id,
                        task_id: task.id.clone(),
                        tool: tool.to_string(),
                        query: query.clone(),
                    })
                    .await;
                log_to_run(run, events_tx, format!("[Tool Call] {tool}: {query}")).await;
            }
            AgentEvent::ToolResult { tool, output } => {
                tracing::debug!(task = %task.id, %tool, bytes = output.len(), "tool result");
            }
            AgentEvent::MessageChunk(chunk) => {
                if verbose {
                    tracing::info!(task = %task.id, answer = %chunk, "final answer");
                }
                answer.get_or_insert_with(String::new).push_str(&chunk);
            }
            AgentEvent::Completed => break,
        }
    }

    answer.ok_or_else(|| StepError::Agent(AgentError::NoAnswer(agent_id.to_string())))
}
