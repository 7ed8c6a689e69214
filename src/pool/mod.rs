//! Fixed-size worker pool
//!
//! A bounded set of worker threads draining one shared task queue. The
//! pool is agnostic to what a task does: callers pick the task type and
//! supply the handler when the pool is created, and tasks are free to
//! enqueue further tasks while they run.
//!
//! Lifecycle: `Created` on initialization, `Running` once workers consume
//! tasks, `Draining` after `shutdown` closes the queue (workers finish
//! whatever is still queued), `Stopped` once every worker has joined.

pub mod queue;
pub mod worker;

pub use queue::{QueueClosed, QueueStats, TaskQueue, TaskReceiver};
pub use worker::Worker;

use crate::error::WorkerError;
use std::sync::Arc;
use tracing::{info, warn};

/// Lifecycle state of a worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Initialized, no workers spawned yet
    Created,

    /// Workers are consuming tasks
    Running,

    /// Shutdown requested; workers are finishing queued tasks
    Draining,

    /// All workers exited and resources released
    Stopped,
}

/// A fixed set of worker threads sharing one task queue
pub struct ThreadPool<T> {
    /// Shared task queue
    queue: Arc<TaskQueue<T>>,

    /// Worker threads
    workers: Vec<Worker>,

    /// Lifecycle state, owned exclusively by the pool
    state: PoolState,
}

impl<T: Send + 'static> ThreadPool<T> {
    /// Spawn `worker_count` workers draining `queue` through `handler`.
    ///
    /// The handler runs on worker threads with whatever shared state it
    /// captured; it must handle its own failures and must not panic.
    pub fn new<H>(
        worker_count: usize,
        queue: Arc<TaskQueue<T>>,
        handler: Arc<H>,
    ) -> Result<Self, WorkerError>
    where
        H: Fn(T) + Send + Sync + 'static,
    {
        let mut pool = Self {
            queue: Arc::clone(&queue),
            workers: Vec::with_capacity(worker_count),
            state: PoolState::Created,
        };

        for id in 0..worker_count {
            pool.workers
                .push(Worker::spawn(id, queue.receiver(), Arc::clone(&handler))?);
        }

        pool.state = PoolState::Running;
        info!(workers = pool.workers.len(), "Worker pool started");
        Ok(pool)
    }
}

impl<T> ThreadPool<T> {
    /// Submit a task to the pool's queue.
    pub fn enqueue(&self, task: T) -> Result<(), WorkerError> {
        self.queue.push(task)?;
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Close the queue and wait for every worker to drain and exit.
    ///
    /// Already-queued tasks are still executed before workers stop.
    /// Idempotent; reports the first worker panic encountered.
    pub fn shutdown(&mut self) -> Result<(), WorkerError> {
        if self.state == PoolState::Stopped {
            return Ok(());
        }

        self.state = PoolState::Draining;
        self.queue.close();

        let mut first_failure = None;
        for worker in std::mem::take(&mut self.workers) {
            let id = worker.id();
            if let Err(e) = worker.join() {
                warn!(worker = id, error = %e, "Worker failed to join cleanly");
                first_failure.get_or_insert(e);
            }
        }

        self.state = PoolState::Stopped;

        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<T> Drop for ThreadPool<T> {
    fn drop(&mut self) {
        if self.state != PoolState::Stopped {
            let _ = self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counting_pool(workers: usize) -> (ThreadPool<u64>, Arc<AtomicU64>) {
        let queue = Arc::new(TaskQueue::new());
        let executed = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&executed);
        let handler = Arc::new(move |_: u64| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let pool = ThreadPool::new(workers, queue, handler).unwrap();
        (pool, executed)
    }

    #[test]
    fn test_pool_executes_all_tasks() {
        let (mut pool, executed) = counting_pool(4);
        assert_eq!(pool.state(), PoolState::Running);
        assert_eq!(pool.worker_count(), 4);

        for n in 0..100 {
            pool.enqueue(n).unwrap();
        }

        pool.shutdown().unwrap();
        assert_eq!(pool.state(), PoolState::Stopped);
        assert_eq!(executed.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let (mut pool, _) = counting_pool(2);
        pool.shutdown().unwrap();
        pool.shutdown().unwrap();
        assert_eq!(pool.state(), PoolState::Stopped);
    }

    #[test]
    fn test_enqueue_after_shutdown_fails() {
        let (mut pool, _) = counting_pool(2);
        pool.shutdown().unwrap();

        let err = pool.enqueue(1).unwrap_err();
        assert!(matches!(err, WorkerError::QueueClosed(_)));
    }

    #[test]
    fn test_drop_shuts_down() {
        let (pool, executed) = counting_pool(2);
        for n in 0..10 {
            pool.enqueue(n).unwrap();
        }
        drop(pool);
        assert_eq!(executed.load(Ordering::SeqCst), 10);
    }
}
