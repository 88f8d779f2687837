//! Runtime run state models.
//!
//! This module defines the structures for tracking the state of a crew run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a crew run.
///
/// A run only moves forward: Pending -> Running -> Completed | Failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Run has been created but no task has started.
    Pending,

    /// A task is executing.
    Running,

    /// Every task finished and every sink was written.
    Completed,

    /// A task failed; later tasks were not executed.
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// The state of a single crew run.
///
/// A new Run with a fresh id is created every time a crew is executed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Run {
    pub id: Uuid,

    /// Name of the crew being executed.
    pub crew_name: String,

    pub status: RunStatus,

    /// Zero-based index of the task currently executing (or last executed).
    pub current_task: usize,

    /// Log lines accumulated during the run.
    pub logs: Vec<String>,

    pub started_at: DateTime<Utc>,

    /// Set when the run reaches a terminal status.
    pub completed_at: Option<DateTime<Utc>>,
}
