//! Run state machine.
//!
//! Functions for moving a [`Run`] through its lifecycle and emitting the
//! matching events. A closed receiver is not an error: events are best-effort.

use chrono::Utc;
use ck_protocol::events::Event;
use ck_protocol::run_models::{Run, RunStatus};
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Create a new Run with Pending status and a fresh id.
pub fn create_run(crew_name: impl Into<String>) -> Run {
    Run {
        id: Uuid::new_v4(),
        crew_name: crew_name.into(),
        status: RunStatus::Pending,
        current_task: 0,
        logs: Vec::new(),
        started_at: Utc::now(),
        completed_at: None,
    }
}

/// Emit `RunStarted` and move the run to Running.
pub async fn start_run(run: &mut Run, events_tx: &Sender<Event>) {
    let _ = events_tx
        .send(Event::RunStarted {
            run_id: run.id,
            crew_name: run.crew_name.clone(),
        })
        .await;
    set_status(run, events_tx, RunStatus::Running).await;
}

/// Mark the run as completed and emit events.
pub async fn complete_run(run: &mut Run, events_tx: &Sender<Event>) {
    set_status(run, events_tx, RunStatus::Completed).await;
    let _ = events_tx.send(Event::RunCompleted { run_id: run.id }).await;
}

/// Mark the run as failed at `task_id` and emit events.
pub async fn fail_run(run: &mut Run, events_tx: &Sender<Event>, task_id: &str, error: String) {
    set_status(run, events_tx, RunStatus::Failed).await;
    let _ = events_tx
        .send(Event::RunFailed {
            run_id: run.id,
            task_id: task_id.to_string(),
            error,
        })
        .await;
}

/// Append a log line to the run and emit it.
pub async fn log_to_run(run: &mut Run, events_tx: &Sender<Event>, message: String) {
    run.logs.push(message.clone());
    let _ = events_tx
        .send(Event::RunLogChunk {
            run_id: run.id,
            content: message,
        })
        .await;
}

/// Move to the task at `index`.
pub fn advance_task(run: &mut Run, index: usize) {
    run.current_task = index;
}

async fn set_status(run: &mut Run, events_tx: &Sender<Event>, status: RunStatus) {
    run.status = status;
    if status.is_terminal() {
        run.completed_at = Some(Utc::now());
    }
    let _ = events_tx
        .send(Event::RunStatusUpdate {
            run_id: run.id,
            status,
            task_index: run.current_task,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_create_run() {
        let run = create_run("research-report");
        assert_eq!(run.crew_name, "research-report");
        assert_eq!(run.status, RunStatus::Pending);
        assert_eq!(run.current_task, 0);
        assert!(run.logs.is_empty());
        assert!(run.completed_at.is_none());
        assert_ne!(run.id, create_run("research-report").id);
    }

    #[tokio::test]
    async fn test_start_run() {
        let mut run = create_run("crew");
        let (tx, mut rx) = mpsc::channel(10);

        start_run(&mut run, &tx).await;
        assert_eq!(run.status, RunStatus::Running);

        let started = rx.recv().await.unwrap();
        assert!(matches!(started, Event::RunStarted { crew_name, .. } if crew_name == "crew"));
        let update = rx.recv().await.unwrap();
        assert!(matches!(
            update,
            Event::RunStatusUpdate {
                status: RunStatus::Running,
                task_index: 0,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_complete_run() {
        let mut run = create_run("crew");
        let (tx, mut rx) = mpsc::channel(10);

        complete_run(&mut run, &tx).await;

        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.completed_at.is_some());
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::RunStatusUpdate {
                status: RunStatus::Completed,
                ..
            }
        ));
        assert!(matches!(rx.recv().await.unwrap(), Event::RunCompleted { .. }));
    }

    #[tokio::test]
    async fn test_fail_run() {
        let mut run = create_run("crew");
        let (tx, mut rx) = mpsc::channel(10);

        advance_task(&mut run, 2);
        fail_run(&mut run, &tx, "report_task", "boom".to_string()).await;

        assert_eq!(run.status, RunStatus::Failed);
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::RunStatusUpdate {
                status: RunStatus::Failed,
                task_index: 2,
                ..
            }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            Event::RunFailed { task_id, error, .. } if task_id == "report_task" && error == "boom"
        ));
    }

    #[tokio::test]
    async fn test_log_to_run_with_closed_receiver() {
        let mut run = create_run("crew");
        let (tx, rx) = mpsc::channel(10);
        drop(rx);

        log_to_run(&mut run, &tx, "still recorded".to_string()).await;
        assert_eq!(run.logs, vec!["still recorded"]);
    }
}
