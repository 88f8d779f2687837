//! Per-run accumulator of task outputs.

use ck_protocol::task_models::TaskOutput;

/// The answers produced so far in one run, in execution order.
///
/// A fresh context is created for every run and never shared between runs.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    entries: Vec<TaskOutput>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, output: TaskOutput) {
        self.entries.push(output);
    }

    pub fn entries(&self) -> &[TaskOutput] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every prior answer verbatim, each under a header naming its
    /// task and agent.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|o| format!("--- Output of {} ({}) ---\n{}", o.task_id, o.agent_id, o.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn into_outputs(self) -> Vec<TaskOutput> {
        self.entries
    }
}
