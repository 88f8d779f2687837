//! Crew construction.
//!
//! `CrewBuilder` collects agents and tasks with explicit calls and checks
//! every cross-reference as it goes, so a `Crew` that exists is always
//! runnable: ids are unique, every task's agent resolves, there is at least
//! one task, and the process mode is supported.

use crate::agents::registry::AgentRegistry;
use crate::config::error::{ConfigError, ConfigResult};
use ck_protocol::agent_models::{AgentDefinition, ToolRef};
use ck_protocol::crew_models::ProcessMode;
use ck_protocol::task_models::TaskDefinition;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// A validated, immutable crew.
#[derive(Debug, Clone)]
pub struct Crew {
    pub(crate) name: String,
    pub(crate) agents: AgentRegistry,
    pub(crate) tasks: Vec<TaskDefinition>,
    pub(crate) process: ProcessMode,
}

impl Crew {
    pub fn builder(name: impl Into<String>) -> CrewBuilder {
        CrewBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    pub fn process(&self) -> ProcessMode {
        self.process
    }

    /// The agent bound to `task`.
    pub fn agent_for(&self, task: &TaskDefinition) -> Option<Arc<AgentDefinition>> {
        self.agents.get_agent(&task.agent_id)
    }
}

/// Collects agents and tasks for a crew.
///
/// Agents must be defined before the tasks that reference them.
///
/// ```
/// use ck_core::crew::CrewBuilder;
/// use ck_protocol::agent_models::ToolRef;
///
/// let mut builder = CrewBuilder::new("research-report");
/// builder
///     .define_agent("researcher", "Researcher", "Find facts", "Careful", vec![ToolRef::search()])
///     .unwrap();
/// builder
///     .define_task("research_task", "researcher", "Research the topic", "Findings", None)
///     .unwrap();
/// let crew = builder.build().unwrap();
/// assert_eq!(crew.tasks().len(), 1);
/// ```
#[derive(Debug)]
pub struct CrewBuilder {
    name: String,
    agents: AgentRegistry,
    tasks: Vec<TaskDefinition>,
    task_ids: HashSet<String>,
    process: ProcessMode,
}

impl CrewBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agents: AgentRegistry::new(),
            tasks: Vec::new(),
            task_ids: HashSet::new(),
            process: ProcessMode::Sequential,
        }
    }

    pub fn process(&mut self, process: ProcessMode) -> &mut Self {
        self.process = process;
        self
    }

    /// Define an agent from its parts.
    ///
    /// # Errors
    ///
    /// `ConfigError::DuplicateAgent` if `id` is already defined.
    pub fn define_agent(
        &mut self,
        id: impl Into<String>,
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        tools: Vec<ToolRef>,
    ) -> ConfigResult<AgentDefinition> {
        let agent = AgentDefinition::new(id, role, goal, backstory).with_tools(tools);
        self.add_agent(agent).map(|a| a.as_ref().clone())
    }

    /// Add a fully specified agent definition.
    pub fn add_agent(&mut self, agent: AgentDefinition) -> ConfigResult<Arc<AgentDefinition>> {
        let id = agent.id.clone();
        self.agents
            .register(agent)
            .ok_or(ConfigError::DuplicateAgent(id))
    }

    /// Define a task from its parts.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DuplicateTask` if `id` is already defined
    /// - `ConfigError::UnknownAgent` if `agent_id` has not been defined yet
    pub fn define_task(
        &mut self,
        id: impl Into<String>,
        agent_id: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        output_file: Option<PathBuf>,
    ) -> ConfigResult<TaskDefinition> {
        let mut task = TaskDefinition::new(id, agent_id, description, expected_output);
        task.output_file = output_file;
        self.add_task(task)
    }

    /// Append a fully specified task. Appending order is execution order.
    pub fn add_task(&mut self, task: TaskDefinition) -> ConfigResult<TaskDefinition> {
        if self.task_ids.contains(&task.id) {
            return Err(ConfigError::DuplicateTask(task.id));
        }
        if !self.agents.has_agent(&task.agent_id) {
            return Err(ConfigError::UnknownAgent {
                task_id: task.id,
                agent_id: task.agent_id,
            });
        }
        self.task_ids.insert(task.id.clone());
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Finish the crew.
    ///
    /// # Errors
    ///
    /// - `ConfigError::EmptyCrew` if no task was defined
    /// - `ConfigError::UnsupportedProcess` for hierarchical crews
    pub fn build(self) -> ConfigResult<Crew> {
        if self.process != ProcessMode::Sequential {
            return Err(ConfigError::UnsupportedProcess(self.process));
        }
        if self.tasks.is_empty() {
            return Err(ConfigError::EmptyCrew(self.name));
        }

        tracing::debug!(
            crew = %self.name,
            agents = self.agents.len(),
            tasks = self.tasks.len(),
            "crew built"
        );

        Ok(Crew {
            name: self.name,
            agents: self.agents,
            tasks: self.tasks,
            process: self.process,
        })
    }
}
