//! Custom assertion helpers for run events.

#![allow(dead_code)]

use ck_protocol::events::Event;
use ck_protocol::run_models::RunStatus;
use uuid::Uuid;

/// Whether the events contain a RunStatusUpdate with `status`.
pub fn has_status_update(events: &[Event], status: RunStatus) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::RunStatusUpdate {
                status: s,
                ..
            } if *s == status
        )
    })
}

/// Task ids from TaskCompleted events, in emission order.
pub fn completed_task_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::TaskCompleted { task_id, .. } => Some(task_id.clone()),
            _ => None,
        })
        .collect()
}

/// Task ids from TaskStarted events, in emission order.
pub fn started_task_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::TaskStarted { task_id, .. } => Some(task_id.clone()),
            _ => None,
        })
        .collect()
}

/// Assert that events form one well-ordered run:
/// 1. RunStarted comes first
/// 2. RunCompleted or RunFailed comes last
/// 3. Every event belongs to the same run
pub fn assert_event_sequence(events: &[Event]) -> Uuid {
    assert!(!events.is_empty(), "Event sequence is empty");

    let run_id = match &events[0] {
        Event::RunStarted { run_id, .. } => *run_id,
        other => panic!("First event should be RunStarted, got: {other:?}"),
    };

    let last = &events[events.len() - 1];
    assert!(
        matches!(last, Event::RunCompleted { .. } | Event::RunFailed { .. }),
        "Last event should be RunCompleted or RunFailed, got: {last:?}"
    );

    assert!(
        events.iter().all(|e| e.run_id() == run_id),
        "All events should carry run id {run_id}"
    );
    run_id
}
