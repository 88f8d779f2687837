//! Configuration models that aggregate all settings.
//!
//! `AppConfig` combines global settings, agent definitions, and crew
//! definitions loaded from `.crew-kit/` and turns a crew definition into a
//! validated [`Crew`].

use crate::config::error::{ConfigError, ConfigResult};
use crate::crew::{Crew, CrewBuilder};
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::config_models::GlobalConfig;
use ck_protocol::crew_models::CrewSpec;

/// Unified application configuration loaded from the `.crew-kit/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use ck_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// let crew = config.build_crew("research-report")?;
/// println!("{} tasks", crew.tasks().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// All agent definitions loaded from `agents/*.md`.
    pub agents: Vec<AgentDefinition>,

    /// All crew definitions loaded from `crews/*.yaml`.
    pub crews: Vec<CrewSpec>,
}

impl AppConfig {
    pub fn crew(&self, name: &str) -> Option<&CrewSpec> {
        self.crews.iter().find(|c| c.name == name)
    }

    pub fn agent(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Build the named crew from its definition and the agents its tasks
    /// reference.
    ///
    /// # Errors
    ///
    /// - `ConfigError::CrewNotFound` if no crew has this name
    /// - any error from [`CrewBuilder`]: a task naming an undefined agent,
    ///   duplicate task ids, no tasks, or an unsupported process mode
    pub fn build_crew(&self, name: &str) -> ConfigResult<Crew> {
        let spec = self
            .crew(name)
            .ok_or_else(|| ConfigError::CrewNotFound(name.to_string()))?;

        let mut builder = CrewBuilder::new(&spec.name);
        builder.process(spec.process);

        for agent_id in spec.referenced_agents() {
            if let Some(agent) = self.agent(agent_id) {
                builder.add_agent(agent.clone())?;
            }
        }

        for task in &spec.tasks {
            builder.add_task(task.clone())?;
        }

        builder.build()
    }
}
