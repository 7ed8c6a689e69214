//! graph-walker - Concurrent Graph Traversal Engine
//!
//! Walks a graph from node 0 with a fixed-size pool of worker threads,
//! folds the value of every reachable node into a shared sum exactly once,
//! and detects termination without busy-polling.
//!
//! # Features
//!
//! - **Exactly-once visitation**: a per-node tri-state marker, checked and
//!   set under one lock, decides which of many concurrent discoverers gets
//!   to process a node. Cycles, self-loops, and multi-edges are safe.
//!
//! - **Exact termination detection**: an outstanding-task counter paired
//!   with a condition variable tells the initiator precisely when no queued
//!   or in-flight work remains, even though tasks spawn more tasks.
//!
//! - **Best-effort cancellation**: a cancellation token (wired to Ctrl-C
//!   and an optional deadline) turns the remaining frontier into no-ops and
//!   leaves a well-defined partial sum.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Graph (immutable)                         │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ neighbour lists
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Worker Threads                             │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐         ┌─────────┐     │
//! │  │Worker 1 │  │Worker 2 │  │Worker 3 │  ...    │Worker N │     │
//! │  └────┬────┘  └────┬────┘  └────┬────┘         └────┬────┘     │
//! │       │            │            │                    │          │
//! │       └────────────┴─────┬──────┴────────────────────┘          │
//! │                          │ pop tasks / push frontier            │
//! │                          ▼                                      │
//! │            ┌──────────────────────────┐                         │
//! │            │   TaskQueue<NodeTask>    │                         │
//! │            │  (crossbeam unbounded)   │                         │
//! │            └────────────┬─────────────┘                         │
//! │                         │                                       │
//! │                         ▼                                       │
//! │            ┌──────────────────────────┐                         │
//! │            │     TraversalState       │                         │
//! │            │  visit markers · sum ·   │                         │
//! │            │  outstanding · condvar   │                         │
//! │            └──────────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼ sum
//!                          stdout
//! ```
//!
//! # Example
//!
//! ```bash
//! # Sum all nodes reachable from node 0
//! graph-walker graph.in
//!
//! # High parallelism with a deadline
//! graph-walker graph.in -w 64 --timeout-secs 30
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod pool;
pub mod walker;

pub use config::{CliArgs, WalkConfig};
pub use error::{Result, WalkerError};
pub use graph::{Graph, Node};
pub use walker::{WalkCoordinator, WalkResult};
