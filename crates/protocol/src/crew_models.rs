//! Crew definition models for `.crew-kit/crews/*.yaml`.
//!
//! A crew file names the crew, picks a process mode and lists its tasks in
//! execution order. Agents are referenced by id and defined separately under
//! `.crew-kit/agents/`.

use crate::task_models::TaskDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a crew schedules its tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    /// Tasks run one after another, each seeing all earlier answers.
    #[default]
    Sequential,

    /// A manager agent delegates to the others. Recognized in crew files but
    /// not executable.
    Hierarchical,
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Hierarchical => f.write_str("hierarchical"),
        }
    }
}

/// A crew as written on disk.
///
/// # Example
///
/// ```yaml
/// name: research-report
/// process: sequential
/// tasks:
///   - id: research_task
///     agent: researcher
///     description: Research the topic.
///     expected-output: A list of verified findings.
///   - id: report_task
///     agent: reporting_analyst
///     description: Turn the findings into a report.
///     expected-output: A markdown report.
///     output-file: results/report.md
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CrewSpec {
    /// Unique name identifying this crew.
    pub name: String,

    /// Optional human-readable summary shown by `crew list`.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub process: ProcessMode,

    /// Tasks in execution order.
    pub tasks: Vec<TaskDefinition>,
}

impl CrewSpec {
    /// Ids of the agents referenced by this crew's tasks, first use first,
    /// without duplicates.
    pub fn referenced_agents(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for task in &self.tasks {
            if !ids.contains(&task.agent_id.as_str()) {
                ids.push(task.agent_id.as_str());
            }
        }
        ids
    }
}
