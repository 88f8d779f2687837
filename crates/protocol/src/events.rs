//! Run events.
//!
//! The engine reports progress through a channel of [`Event`]s so callers can
//! render progress, persist logs, or ignore them entirely. Sending never
//! blocks the run on a closed receiver.
//!
//! Events serialize as tagged JSON:
//! ```json
//! {
//!   "type": "taskCompleted",
//!   "payload": {
//!     "run_id": "uuid-here",
//!     "task_id": "research_task",
//!     "task_index": 0
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::run_models::RunStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new run has been created.
    RunStarted { run_id: Uuid, crew_name: String },

    /// The run's status has changed.
    RunStatusUpdate {
        run_id: Uuid,
        status: RunStatus,
        task_index: usize,
    },

    /// A task is about to be handed to its agent.
    TaskStarted {
        run_id: Uuid,
        task_id: String,
        agent_id: String,
        task_index: usize,
    },

    /// An agent called one of its tools.
    ToolCalled {
        run_id: Uuid,
        task_id: String,
        tool: String,
        query: String,
    },

    /// A task produced its answer.
    TaskCompleted {
        run_id: Uuid,
        task_id: String,
        task_index: usize,
    },

    /// A task's answer was written to its sink.
    ArtifactWritten {
        run_id: Uuid,
        task_id: String,
        path: PathBuf,
    },

    /// The run produced a log line.
    RunLogChunk { run_id: Uuid, content: String },

    /// Every task finished.
    RunCompleted { run_id: Uuid },

    /// A task failed and the run was aborted.
    RunFailed {
        run_id: Uuid,
        task_id: String,
        error: String,
    },
}

impl Event {
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::RunStatusUpdate { run_id, .. }
            | Self::TaskStarted { run_id, .. }
            | Self::ToolCalled { run_id, .. }
            | Self::TaskCompleted { run_id, .. }
            | Self::ArtifactWritten { run_id, .. }
            | Self::RunLogChunk { run_id, .. }
            | Self::RunCompleted { run_id }
            | Self::RunFailed { run_id, .. } => *run_id,
        }
    }
}
