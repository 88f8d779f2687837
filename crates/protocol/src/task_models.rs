//! Task definitions and the results they produce.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A unit of work bound to one agent.
///
/// Tasks are declared inside a crew file; their order in the file is their
/// execution order.
///
/// # Example
///
/// ```yaml
/// - id: report_task
///   agent: reporting_analyst
///   description: Write the final report with actionable insights.
///   expected-output: A markdown report with an executive summary.
///   output-file: results/report.md
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TaskDefinition {
    /// Unique identifier for this task within a crew.
    pub id: String,

    /// Id of the agent that executes this task.
    #[serde(rename = "agent")]
    pub agent_id: String,

    /// What the agent must do.
    pub description: String,

    /// Free-text acceptance criterion for the answer.
    pub expected_output: String,

    /// Where the task's answer is written, if anywhere.
    ///
    /// Relative paths resolve against the engine's output root. The file is
    /// overwritten on every run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl TaskDefinition {
    pub fn new(
        id: impl Into<String>,
        agent_id: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            agent_id: agent_id.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            output_file: None,
        }
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

/// The answer produced by one task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub task_id: String,
    pub agent_id: String,
    pub text: String,
}

/// Everything a successful crew run produced.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalResult {
    /// One entry per task, in execution order.
    pub per_task_results: Vec<TaskOutput>,

    /// Paths of every sink file written during the run, in write order.
    pub written_artifacts: Vec<PathBuf>,
}

impl FinalResult {
    /// The answer of the last task, which is the crew's deliverable.
    pub fn final_output(&self) -> Option<&TaskOutput> {
        self.per_task_results.last()
    }

    /// Look up the answer of a task by id.
    pub fn output_of(&self, task_id: &str) -> Option<&str> {
        self.per_task_results
            .iter()
            .find(|o| o.task_id == task_id)
            .map(|o| o.text.as_str())
    }
}
