//! Deferred task execution.
//!
//! The strategy never runs a caller's callback inline. It hands the whole
//! request to a [`Schedule`] implementation, which runs it on a later turn.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use tokio::runtime::Handle;

/// A unit of deferred work.
pub type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs tasks asynchronously, on a later turn than the caller's.
///
/// `defer` must return without polling `task`.
pub trait Schedule: Send + Sync {
    fn defer(&self, task: Task);
}

/// Scheduler backed by a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler for the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Schedule for TokioScheduler {
    fn defer(&self, task: Task) {
        // Detached: the task owns everything it needs, including the callback.
        drop(self.handle.spawn(task));
    }
}

/// Scheduler that queues tasks until its owner drains them.
///
/// Useful for single-threaded cooperative loops, and for tests that need
/// to observe exactly when deferred work runs.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<Task>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Runs queued tasks to completion, in FIFO order, until the queue is
    /// empty. Tasks deferred while draining run in the same call.
    ///
    /// Returns the number of tasks run.
    pub async fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // The guard must not be held across the await.
            let next = self.lock().pop_front();
            match next {
                Some(task) => {
                    task.await;
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Task>> {
        // A poisoned queue still holds valid tasks.
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Schedule for ManualScheduler {
    fn defer(&self, task: Task) {
        self.lock().push_back(task);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
