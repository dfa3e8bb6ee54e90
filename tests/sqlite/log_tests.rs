//! Decision-log tests for [`SqliteTaskStore`].

use crate::sqlite::helpers::{memory_store, runtime, seed_pending};
use chrono::{DateTime, TimeZone, Utc};
use priority_engine::task::{
    domain::{DecisionLog, NewDecisionLog, SelectionMethod, Task},
    ports::TaskStore,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn chosen_at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 14, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Tests that an append returns the row with its assigned handle and
/// both timestamps intact.
#[rstest]
fn append_returns_the_persisted_log(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let store = memory_store(&rt).expect("store setup");

    let seeded = seed_pending(&rt, &store, &["Logged task"]).expect("seed");
    let task_id = seeded.first().map(Task::id).expect("seeded task");

    let draft = NewDecisionLog::new(task_id, SelectionMethod::Manual, chosen_at(0))
        .with_completed_at(chosen_at(25));
    let appended = rt.block_on(store.append_log(&draft)).expect("append");

    assert!(appended.id().value() >= 1);
    assert_eq!(appended.task_id(), task_id);
    assert_eq!(appended.method(), SelectionMethod::Manual);
    assert_eq!(appended.chosen_at(), chosen_at(0));
    assert_eq!(appended.completed_at(), Some(chosen_at(25)));
}

/// Tests that per-task history is oldest first and filtered by task.
#[rstest]
fn history_is_oldest_first_and_filtered(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let store = memory_store(&rt).expect("store setup");

    let seeded = seed_pending(&rt, &store, &["Mine", "Theirs"]).expect("seed");
    let mine = seeded.first().map(Task::id).expect("seeded task");
    let theirs = seeded.get(1).map(Task::id).expect("seeded task");

    for minute in [30, 10] {
        rt.block_on(store.append_log(&NewDecisionLog::new(
            mine,
            SelectionMethod::Manual,
            chosen_at(minute),
        )))
        .expect("append mine");
    }
    rt.block_on(store.append_log(&NewDecisionLog::new(
        theirs,
        SelectionMethod::Auto,
        chosen_at(20),
    )))
    .expect("append theirs");

    let history = rt.block_on(store.logs_for_task(mine)).expect("history");
    let times: Vec<DateTime<Utc>> = history.iter().copied().map(DecisionLog::chosen_at).collect();
    assert_eq!(times, [chosen_at(10), chosen_at(30)]);
}

/// Tests that the recency query is newest first and honours its limit.
#[rstest]
fn recent_logs_are_newest_first_and_limited(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let store = memory_store(&rt).expect("store setup");

    let seeded = seed_pending(&rt, &store, &["Busy task"]).expect("seed");
    let task_id = seeded.first().map(Task::id).expect("seeded task");

    for minute in [5, 45, 25] {
        rt.block_on(store.append_log(&NewDecisionLog::new(
            task_id,
            SelectionMethod::Manual,
            chosen_at(minute),
        )))
        .expect("append");
    }

    let recent = rt.block_on(store.recent_logs(2)).expect("recency query");
    let times: Vec<DateTime<Utc>> = recent.iter().copied().map(DecisionLog::chosen_at).collect();
    assert_eq!(times, [chosen_at(45), chosen_at(25)]);
}

/// Tests that an open entry round-trips without a completion timestamp.
#[rstest]
fn open_entries_keep_a_null_completion(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let store = memory_store(&rt).expect("store setup");

    let seeded = seed_pending(&rt, &store, &["Open task"]).expect("seed");
    let task_id = seeded.first().map(Task::id).expect("seeded task");

    let appended = rt
        .block_on(store.append_log(&NewDecisionLog::new(
            task_id,
            SelectionMethod::Auto,
            chosen_at(0),
        )))
        .expect("append");
    assert!(appended.completed_at().is_none());

    let history = rt.block_on(store.logs_for_task(task_id)).expect("history");
    assert_eq!(history.first().copied().and_then(DecisionLog::completed_at), None);
}
