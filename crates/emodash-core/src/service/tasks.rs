//! Task operations.

use emodash_api::{NewTask, RemoteStore, Task, TaskId, TaskPatch};
use tracing::debug;

use super::{Reloaded, confirm};
use crate::error::Result;

/// Loads all tasks.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn reload<S: RemoteStore>(store: &S) -> Result<Vec<Task>> {
    Ok(store.list_tasks().await?)
}

/// Creates a task, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn create<S: RemoteStore>(store: &S, task: &NewTask) -> Result<Reloaded<(), Vec<Task>>> {
    let outcome = store.create_task(task).await;
    if let Ok(id) = &outcome {
        debug!(%id, "task created");
    }
    Ok(confirm(outcome, reload(store)).await?.discard())
}

/// Updates a task, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn update<S: RemoteStore>(
    store: &S,
    id: TaskId,
    patch: &TaskPatch,
) -> Result<Reloaded<(), Vec<Task>>> {
    let outcome = store.update_task(id, patch).await;
    debug!(%id, ?patch, ok = outcome.is_ok(), "task update answered");
    confirm(outcome, reload(store)).await
}

/// Deletes a task, then reloads.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the reload fails.
pub async fn delete<S: RemoteStore>(store: &S, id: TaskId) -> Result<Reloaded<(), Vec<Task>>> {
    let outcome = store.delete_task(id).await;
    debug!(%id, ok = outcome.is_ok(), "task delete answered");
    confirm(outcome, reload(store)).await
}
