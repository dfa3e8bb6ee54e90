//! Contract tests for [`InMemoryTaskStore`].
//!
//! Tests handle assignment, CRUD behaviour, pending ordering, and the
//! atomic urgency split.

use crate::in_memory::helpers::{clock, runtime, seed_pending, store};
use mockable::DefaultClock;
use priority_engine::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{DoneDefinition, NewTask, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that handles are positive and strictly ascending.
#[rstest]
fn add_task_assigns_ascending_handles(
    runtime: io::Result<Runtime>,
    store: InMemoryTaskStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let first = rt
        .block_on(store.add_task(&NewTask::new("First", &clock).expect("draft")))
        .expect("first insert");
    let second = rt
        .block_on(store.add_task(&NewTask::new("Second", &clock).expect("draft")))
        .expect("second insert");

    assert!(first.id().value() >= 1);
    assert!(second.id() > first.id(), "Handles must ascend");
}

/// Tests that looking up a handle that was never assigned returns `None`.
#[rstest]
fn find_task_returns_none_for_missing(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let missing = TaskId::new(404).expect("task id");
    let found = rt.block_on(store.find_task(missing)).expect("lookup");
    assert!(found.is_none());
}

/// Tests that an update rewrites status and done-definition.
#[rstest]
fn update_task_persists_activation(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let seeded = seed_pending(&rt, &store, &["Reply to client"]).expect("seed");
    let mut task = seeded.first().cloned().expect("seeded task");

    let definition = DoneDefinition::new("Email is sent").expect("definition");
    task.attach_done_definition(definition).expect("activation");
    rt.block_on(store.update_task(&task)).expect("update");

    let stored = rt
        .block_on(store.find_task(task.id()))
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored.status(), TaskStatus::Active);
    assert_eq!(
        stored.done_definition().map(DoneDefinition::as_str),
        Some("Email is sent")
    );
}

/// Tests that updating an unknown handle reports `NotFound`.
#[rstest]
fn update_missing_task_reports_not_found(
    runtime: io::Result<Runtime>,
    store: InMemoryTaskStore,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let seeded = rt
        .block_on(store.add_task(&NewTask::new("Ghost", &clock).expect("draft")))
        .expect("insert");
    rt.block_on(store.delete_task(seeded.id())).expect("delete");

    let result = rt.block_on(store.update_task(&seeded));
    assert!(
        matches!(result, Err(TaskStoreError::NotFound(id)) if id == seeded.id()),
        "Update of a deleted handle must report NotFound"
    );
}

/// Tests that deletion is idempotent.
#[rstest]
fn delete_task_tolerates_absent_handles(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let seeded = seed_pending(&rt, &store, &["Short lived"]).expect("seed");
    let id = seeded.first().map(Task::id).expect("seeded task");

    rt.block_on(store.delete_task(id)).expect("first delete");
    rt.block_on(store.delete_task(id)).expect("second delete");
    assert!(rt.block_on(store.find_task(id)).expect("lookup").is_none());
}

/// Tests that pending tasks come back in insertion order.
#[rstest]
fn pending_tasks_preserve_insertion_order(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    seed_pending(&rt, &store, &["First", "Second", "Third"]).expect("seed");

    let pending = rt.block_on(store.pending_tasks()).expect("pending query");
    let texts: Vec<&str> = pending.iter().map(|task| task.text().as_str()).collect();
    assert_eq!(texts, ["First", "Second", "Third"]);
}

/// Tests that the pending count excludes activated tasks.
#[rstest]
fn pending_count_excludes_active_tasks(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let seeded = seed_pending(&rt, &store, &["Keep pending", "Activate me"]).expect("seed");
    let mut active = seeded.get(1).cloned().expect("seeded task");
    active
        .attach_done_definition(DoneDefinition::new("Plants are watered").expect("definition"))
        .expect("activation");
    rt.block_on(store.update_task(&active)).expect("update");

    assert_eq!(rt.block_on(store.pending_count()).expect("count"), 1);
    let pending = rt.block_on(store.pending_tasks()).expect("pending query");
    assert_eq!(pending.len(), 1);
}

/// Tests that one call splits urgency flags across both sets.
#[rstest]
fn apply_urgency_splits_both_sets(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let seeded = seed_pending(&rt, &store, &["Urgent one", "Calm one", "Urgent two"])
        .expect("seed");
    let ids: Vec<TaskId> = seeded.iter().map(Task::id).collect();
    let (urgent, calm): (Vec<TaskId>, Vec<TaskId>) = (
        ids.iter().copied().step_by(2).collect(),
        ids.iter().copied().skip(1).step_by(2).collect(),
    );

    rt.block_on(store.apply_urgency(&urgent, &calm)).expect("split");

    let pending = rt.block_on(store.pending_tasks()).expect("pending query");
    for task in pending {
        assert_eq!(task.is_urgent(), urgent.contains(&task.id()));
    }
}

/// Tests that handles deleted mid-triage are skipped, not errors.
#[rstest]
fn apply_urgency_skips_deleted_handles(runtime: io::Result<Runtime>, store: InMemoryTaskStore) {
    let rt = runtime.expect("runtime creation");
    let seeded = seed_pending(&rt, &store, &["Survivor", "Dismissed"]).expect("seed");
    let survivor = seeded.first().map(Task::id).expect("seeded task");
    let dismissed = seeded.get(1).map(Task::id).expect("seeded task");
    rt.block_on(store.delete_task(dismissed)).expect("delete");

    rt.block_on(store.apply_urgency(&[survivor, dismissed], &[]))
        .expect("split with a stale handle");

    let stored = rt
        .block_on(store.find_task(survivor))
        .expect("lookup")
        .expect("survivor exists");
    assert!(stored.is_urgent());
    assert!(
        rt.block_on(store.find_task(dismissed))
            .expect("lookup")
            .is_none(),
        "The split must not resurrect a deleted task"
    );
}
