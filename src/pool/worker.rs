//! Worker thread logic for the pool
//!
//! Each worker loops popping tasks from the shared queue and handing them
//! to the pool's task handler until the queue reports end-of-work. The
//! worker is agnostic to what a task does; the handler owns all shared
//! state and must not panic.

use crate::error::WorkerError;
use crate::pool::queue::TaskReceiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A worker thread that executes queued tasks
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker thread draining `receiver` through `handler`.
    pub fn spawn<T, H>(
        id: usize,
        receiver: TaskReceiver<T>,
        handler: Arc<H>,
    ) -> Result<Self, WorkerError>
    where
        T: Send + 'static,
        H: Fn(T) + Send + Sync + 'static,
    {
        let handle = thread::Builder::new()
            .name(format!("walker-{id}"))
            .spawn(move || worker_loop(id, receiver, handler))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to observe end-of-work and exit.
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| WorkerError::Panicked { id: self.id })?;
        }
        Ok(())
    }
}

/// Main worker loop
fn worker_loop<T, H>(id: usize, receiver: TaskReceiver<T>, handler: Arc<H>)
where
    H: Fn(T),
{
    debug!(worker = id, "Worker starting");

    let mut executed = 0u64;
    while let Some(task) = receiver.pop() {
        handler(task);
        executed += 1;
    }

    debug!(worker = id, tasks = executed, "Worker shutting down");
}
