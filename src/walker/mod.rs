//! Concurrent graph traversal
//!
//! This module implements the traversal engine: shared visitation state
//! guaranteeing exactly-once processing, exact termination detection, and
//! the coordinator tying them to the worker pool.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────────────────┐
//!                  │      WalkCoordinator      │
//!                  │  - seeds node 0 inline    │
//!                  │  - waits on termination   │
//!                  └─────────────┬─────────────┘
//!                                │
//!        ┌───────────────────────┼───────────────────────┐
//!        │                       │                       │
//!  ┌─────▼─────┐           ┌─────▼─────┐           ┌─────▼─────┐
//!  │  Worker 1 │           │  Worker 2 │           │  Worker N │
//!  └─────┬─────┘           └─────┬─────┘           └─────┬─────┘
//!        │        pop / push frontier tasks              │
//!        └───────────────────────┼───────────────────────┘
//!                                ▼
//!                  ┌───────────────────────────┐
//!                  │    TaskQueue<NodeTask>    │
//!                  │   (crossbeam unbounded)   │
//!                  └───────────────────────────┘
//!                                │
//!                                ▼
//!                  ┌───────────────────────────┐
//!                  │      TraversalState       │
//!                  │  visited states · sum ·   │
//!                  │  outstanding · condvar    │
//!                  └───────────────────────────┘
//! ```

pub mod coordinator;
pub mod state;

pub use coordinator::{WalkCoordinator, WalkResult};
pub use state::{CancelToken, TraversalSnapshot, TraversalState, VisitState};

/// The traversal always starts at node 0
pub const ROOT_NODE: usize = 0;

/// One unit of traversal work: process a single node.
///
/// Submitted to the queue once per discovery, executed by exactly one
/// worker, never requeued. Duplicate tasks for the same node are safe;
/// every execution after the first is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTask {
    /// Index of the node to process
    pub node: usize,
}

impl NodeTask {
    /// Create a task for one node
    pub fn new(node: usize) -> Self {
        Self { node }
    }
}
