//! Pending background task bookkeeping.

use crate::AvailabilityScanner;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for a scheduled task.
pub type TaskId = Uuid;

/// A task that has been armed and has not yet removed itself.
#[derive(Debug)]
struct PendingTask {
    name: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Table {
    open: bool,
    tasks: HashMap<TaskId, PendingTask>,
}

/// Table of pending tasks, shared between the controller and the tasks.
///
/// The table starts closed. While it is closed nothing can be armed, and
/// closing it cancels every pending task under the same lock, so no task can
/// slip in after a close. Each task removes its own entry when it finishes.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingTasks {
    table: Arc<Mutex<Table>>,
}

impl PendingTasks {
    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the table for arming and returns whether it was already open.
    pub(crate) fn open(&self) -> bool {
        std::mem::replace(&mut self.lock().open, true)
    }

    /// Closes the table, cancels every pending task and hands back their
    /// join handles.
    pub(crate) fn close(&self) -> Vec<JoinHandle<()>> {
        let mut table = self.lock();
        table.open = false;
        table
            .tasks
            .drain()
            .map(|(id, task)| {
                debug!(task = %id, name = %task.name, "Cancelling task");
                task.token.cancel();
                task.handle
            })
            .collect()
    }

    /// Returns true if new tasks can be armed.
    pub(crate) fn is_open(&self) -> bool {
        self.lock().open
    }

    /// Spawns a task that runs `scanner` after `delay` unless cancelled first.
    ///
    /// Returns `None` if the table is closed. The entry is inserted under the
    /// same lock the task takes to remove itself, so removal can never precede
    /// insertion.
    pub(crate) fn arm(
        &self,
        runtime: &Handle,
        name: String,
        delay: Duration,
        scanner: Arc<AvailabilityScanner>,
    ) -> Option<TaskId> {
        let mut table = self.lock();
        if !table.open {
            return None;
        }

        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let handle = runtime.spawn(run_delayed(
            id,
            delay,
            token.clone(),
            scanner,
            self.clone(),
        ));
        debug!(task = %id, name = %name, "Started task");
        table.tasks.insert(
            id,
            PendingTask {
                name,
                token,
                handle,
            },
        );

        Some(id)
    }

    /// Removes a finished task's entry.
    fn remove(&self, id: TaskId) {
        if let Some(task) = self.lock().tasks.remove(&id) {
            debug!(task = %id, name = %task.name, "Task finished");
        }
    }

    /// Returns the number of pending tasks.
    pub(crate) fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Returns true if the given task is still pending.
    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.lock().tasks.contains_key(&id)
    }
}

/// Body of a scheduled task.
///
/// Cancellation only wins while the task is still waiting out its delay; a
/// scan that has begun runs to completion.
async fn run_delayed(
    id: TaskId,
    delay: Duration,
    token: CancellationToken,
    scanner: Arc<AvailabilityScanner>,
    tasks: PendingTasks,
) {
    tokio::select! {
        biased;
        () = token.cancelled() => {
            debug!(task = %id, "Task cancelled before its scan started");
        }
        () = tokio::time::sleep(delay) => {
            scanner.run().await;
        }
    }

    tasks.remove(id);
}
