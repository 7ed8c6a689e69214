//! Task queue for the worker pool
//!
//! An unbounded FIFO over a crossbeam channel. The queue owns the only
//! sender; closing the queue drops it, so blocked workers drain whatever
//! remains and then observe end-of-work. Tasks submitted from one thread
//! keep their order; submissions from different threads may interleave.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Error returned when pushing to a finalized queue
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("task queue is closed")]
pub struct QueueClosed;

/// Statistics for the task queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total tasks enqueued
    pub enqueued: AtomicU64,

    /// Total tasks dequeued
    pub dequeued: AtomicU64,
}

impl QueueStats {
    /// Total tasks accepted by the queue
    pub fn enqueued_count(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Total tasks handed to workers
    pub fn dequeued_count(&self) -> u64 {
        self.dequeued.load(Ordering::Relaxed)
    }
}

/// Thread-safe FIFO of pending tasks, bounded only by available memory
pub struct TaskQueue<T> {
    /// The sole sender; taken and dropped on close
    sender: Mutex<Option<Sender<T>>>,

    /// Receiver cloned out to workers
    receiver: Receiver<T>,

    /// Set once `close` has been called
    closed: AtomicBool,

    /// Queue statistics
    stats: Arc<QueueStats>,
}

impl<T> TaskQueue<T> {
    /// Create a new open queue
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();

        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
            closed: AtomicBool::new(false),
            stats: Arc::new(QueueStats::default()),
        }
    }

    /// Submit a task.
    ///
    /// Never blocks. Fails only once the queue has been finalized.
    pub fn push(&self, task: T) -> Result<(), QueueClosed> {
        let guard = self.sender.lock();
        match guard.as_ref() {
            Some(sender) => {
                sender.send(task).map_err(|_| QueueClosed)?;
                self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            None => Err(QueueClosed),
        }
    }

    /// Get a receiving handle for a worker (clone per worker)
    pub fn receiver(&self) -> TaskReceiver<T> {
        TaskReceiver {
            receiver: self.receiver.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    /// Finalize the queue: refuse further pushes and let workers drain
    /// what remains before they observe end-of-work. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.sender.lock().take();
    }

    /// Whether the queue has been finalized
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Current number of queued tasks
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no tasks are currently queued
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Get queue statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for receiving tasks from the queue
#[derive(Clone)]
pub struct TaskReceiver<T> {
    receiver: Receiver<T>,
    stats: Arc<QueueStats>,
}

impl<T> TaskReceiver<T> {
    /// Dequeue the next task.
    ///
    /// Blocks until a task is available. Returns `None` only once the
    /// queue is closed and fully drained (end-of-work).
    pub fn pop(&self) -> Option<T> {
        match self.receiver.recv() {
            Ok(task) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(task)
            }
            Err(_) => None,
        }
    }

    /// Dequeue without blocking
    pub fn try_pop(&self) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(task) => {
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                Some(task)
            }
            Err(_) => None,
        }
    }

    /// Current number of queued tasks
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no tasks are currently queued
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_queue_basic() {
        let queue = TaskQueue::new();
        let receiver = queue.receiver();

        queue.push(7usize).unwrap();
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(receiver.pop(), Some(7));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fifo_order_single_producer() {
        let queue = TaskQueue::new();
        let receiver = queue.receiver();

        for i in 0..100usize {
            queue.push(i).unwrap();
        }
        for i in 0..100usize {
            assert_eq!(receiver.try_pop(), Some(i));
        }
    }

    #[test]
    fn test_push_after_close_refused() {
        let queue = TaskQueue::new();
        queue.push(1usize).unwrap();

        queue.close();
        assert!(queue.is_closed());
        assert_eq!(queue.push(2), Err(QueueClosed));

        // Closing again is a no-op
        queue.close();
    }

    #[test]
    fn test_pop_drains_then_ends() {
        let queue = TaskQueue::new();
        let receiver = queue.receiver();

        queue.push(1usize).unwrap();
        queue.push(2usize).unwrap();
        queue.close();

        // Remaining tasks are still delivered after close
        assert_eq!(receiver.pop(), Some(1));
        assert_eq!(receiver.pop(), Some(2));

        // Then end-of-work
        assert_eq!(receiver.pop(), None);
    }

    #[test]
    fn test_blocked_pop_wakes_on_close() {
        let queue = Arc::new(TaskQueue::<usize>::new());
        let receiver = queue.receiver();

        let handle = thread::spawn(move || receiver.pop());

        // Give the popper time to block, then close
        thread::sleep(std::time::Duration::from_millis(50));
        queue.close();

        assert_eq!(handle.join().unwrap(), None);
    }

    #[test]
    fn test_queue_stats() {
        let queue = TaskQueue::new();
        let receiver = queue.receiver();

        queue.push(1usize).unwrap();
        queue.push(2usize).unwrap();
        receiver.pop().unwrap();

        let stats = queue.stats();
        assert_eq!(stats.enqueued_count(), 2);
        assert_eq!(stats.dequeued_count(), 1);
    }
}
