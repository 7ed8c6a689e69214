//! Shared traversal state: visitation coordination and termination detection
//!
//! All mutable traversal state (per-node visit markers, the running sum,
//! the processed and outstanding counters) lives behind one mutex, and the
//! Unvisited → Enqueuing transition under that lock is the single
//! serialization point deciding which thread gets to process a node. Many
//! workers may discover the same node via different edges; every claim
//! after the first is a no-op, which is what makes visitation exactly-once.
//!
//! Termination is detected exactly, not approximated: `outstanding` is
//! incremented under the lock when a frontier task is submitted and
//! decremented after the task body ran (no-ops included), so once the root
//! has been seeded, `outstanding == 0` means no queued and no in-flight
//! work remains anywhere. The initiator waits on a condvar keyed to that
//! predicate; nothing spins or sleeps on a timer.

use crate::error::GraphError;
use crate::graph::Graph;
use crate::pool::TaskQueue;
use crate::walker::NodeTask;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Per-node visitation marker guarding exactly-once processing.
///
/// Transitions only `Unvisited → Enqueuing → Visited`, at most once per
/// traversal. `Enqueuing` marks "claimed, frontier being expanded" as
/// distinct from "fully done"; for the sum and the exactly-once guarantee
/// only the departure from `Unvisited` matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Not yet claimed by any worker
    Unvisited,

    /// Claimed; the owning thread is expanding its neighbours
    Enqueuing,

    /// Fully processed
    Visited,
}

/// Best-effort cancellation signal.
///
/// Settable at any time (Ctrl-C, deadline); observed before claiming a
/// node and before each frontier submission. Already-queued tasks for
/// already-claimed nodes still execute but become no-ops, yielding a
/// well-defined partial sum rather than an exact cutoff.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// State guarded by the coordinator lock
struct Inner {
    /// Per-node visitation markers
    states: Vec<VisitState>,

    /// Running sum of visited node values
    sum: i64,

    /// Nodes fully visited, incremented exactly once per node
    processed: u64,

    /// Frontier tasks submitted but not yet finished executing
    outstanding: u64,

    /// First fatal defect recorded by a worker, if any
    fatal: Option<GraphError>,
}

/// Point-in-time copy of the accumulator and counters
#[derive(Debug, Clone, Copy)]
pub struct TraversalSnapshot {
    /// Running sum of visited node values
    pub sum: i64,

    /// Nodes fully visited
    pub processed: u64,

    /// Frontier tasks still queued or in flight
    pub outstanding: u64,
}

/// Shared traversal state for one walk.
///
/// Created per traversal and owned by the coordinator's lifecycle; never
/// a process-wide singleton. Workers and the initiator share it through
/// an `Arc`.
pub struct TraversalState {
    /// The immutable graph being walked
    graph: Arc<Graph>,

    /// Queue receiving frontier tasks
    queue: Arc<TaskQueue<NodeTask>>,

    /// Global stop flag
    cancel: CancelToken,

    /// All mutable state, under one lock
    inner: Mutex<Inner>,

    /// Signalled on every processed/outstanding change
    progressed: Condvar,
}

impl TraversalState {
    /// Create traversal state for `graph`, expanding frontiers onto `queue`.
    pub fn new(graph: Arc<Graph>, queue: Arc<TaskQueue<NodeTask>>, cancel: CancelToken) -> Self {
        let node_count = graph.len();
        Self {
            graph,
            queue,
            cancel,
            inner: Mutex::new(Inner {
                states: vec![VisitState::Unvisited; node_count],
                sum: 0,
                processed: 0,
                outstanding: 0,
                fatal: None,
            }),
            progressed: Condvar::new(),
        }
    }

    /// Get a handle to the stop flag
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Fold node `idx` into the sum and expand its frontier, exactly once.
    ///
    /// Safe to call any number of times for the same node from any number
    /// of threads; every call after the first claim is a no-op, as is any
    /// call after cancellation. Returns an error only for an out-of-range
    /// index, which is an input defect, never a race.
    pub fn process_node(&self, idx: usize) -> Result<(), GraphError> {
        let node = self.graph.node(idx).ok_or(GraphError::NodeOutOfRange {
            index: idx,
            count: self.graph.len(),
        })?;

        let mut inner = self.inner.lock();

        if inner.states[idx] != VisitState::Unvisited || self.cancel.is_cancelled() {
            return Ok(());
        }

        // The single serialization point: whoever flips this owns the node.
        inner.states[idx] = VisitState::Enqueuing;
        inner.sum += node.value;

        for &neighbour in &node.neighbours {
            // Neighbour indices were validated at graph load
            if inner.states[neighbour] != VisitState::Unvisited || self.cancel.is_cancelled() {
                continue;
            }

            inner.outstanding += 1;
            if self.queue.push(NodeTask::new(neighbour)).is_err() {
                // Queue already finalized; only reachable during
                // cancellation-driven teardown. Roll back and stop.
                inner.outstanding -= 1;
                break;
            }
        }

        inner.states[idx] = VisitState::Visited;
        inner.processed += 1;

        drop(inner);
        self.progressed.notify_all();
        Ok(())
    }

    /// Record the completion of one dequeued task, no-ops included.
    ///
    /// Must be called exactly once per task handed to a worker; pairing
    /// with the submit-time increment is what keeps `outstanding` exact.
    pub fn task_done(&self) {
        let mut inner = self.inner.lock();
        debug_assert!(inner.outstanding > 0, "task_done without matching submit");
        inner.outstanding -= 1;
        drop(inner);
        self.progressed.notify_all();
    }

    /// Record a fatal defect observed on a worker and wake the initiator.
    ///
    /// The first defect wins; cancellation stops the remaining frontier.
    pub fn record_fatal(&self, error: GraphError) {
        let mut inner = self.inner.lock();
        inner.fatal.get_or_insert(error);
        drop(inner);
        self.cancel.cancel();
        self.progressed.notify_all();
    }

    /// Block until no queued or in-flight tasks remain.
    ///
    /// Wakes on every counter change and re-checks the predicate; a
    /// transiently empty queue mid-expansion never satisfies it. Returns
    /// the first fatal defect if one was recorded.
    pub fn wait_for_completion(&self) -> Result<(), GraphError> {
        let mut inner = self.inner.lock();
        while inner.outstanding > 0 && inner.fatal.is_none() {
            self.progressed.wait(&mut inner);
        }

        match inner.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Snapshot the accumulator and counters
    pub fn snapshot(&self) -> TraversalSnapshot {
        let inner = self.inner.lock();
        TraversalSnapshot {
            sum: inner.sum,
            processed: inner.processed,
            outstanding: inner.outstanding,
        }
    }

    /// Visit state of one node, if it exists
    pub fn visit_state(&self, idx: usize) -> Option<VisitState> {
        self.inner.lock().states.get(idx).copied()
    }
}
