//! Walk coordinator - orchestrates the concurrent graph traversal
//!
//! The coordinator is responsible for:
//! - Setting up the task queue, shared state, and worker pool
//! - Seeding the traversal by processing the root node inline
//! - Blocking until termination is detected (or the walk is cancelled)
//! - Tearing down the pool and reporting the final sum

use crate::config::WalkConfig;
use crate::error::Result;
use crate::graph::Graph;
use crate::pool::{TaskQueue, ThreadPool};
use crate::walker::state::{CancelToken, TraversalState};
use crate::walker::{NodeTask, ROOT_NODE};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a completed walk
#[derive(Debug, Clone, Copy)]
pub struct WalkResult {
    /// Sum of the values of all processed nodes
    pub sum: i64,

    /// Number of nodes folded into the sum
    pub nodes_processed: u64,

    /// Time taken for the walk
    pub duration: Duration,

    /// Whether the walk completed (vs was cancelled)
    pub completed: bool,
}

/// Coordinates one concurrent traversal of one graph
pub struct WalkCoordinator {
    /// Validated configuration
    config: WalkConfig,

    /// The graph being walked
    graph: Arc<Graph>,

    /// Shared visitation and termination state
    state: Arc<TraversalState>,

    /// Queue of pending frontier tasks
    queue: Arc<TaskQueue<NodeTask>>,

    /// Global stop flag
    cancel: CancelToken,
}

impl WalkCoordinator {
    /// Create a coordinator for one traversal of `graph`.
    pub fn new(config: WalkConfig, graph: Graph) -> Self {
        let graph = Arc::new(graph);
        let queue = Arc::new(TaskQueue::new());
        let cancel = CancelToken::new();
        let state = Arc::new(TraversalState::new(
            Arc::clone(&graph),
            Arc::clone(&queue),
            cancel.clone(),
        ));

        Self {
            config,
            graph,
            state,
            queue,
            cancel,
        }
    }

    /// Get a handle to the stop flag (for Ctrl-C handlers and deadlines)
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the traversal to completion (or cancellation) and return the sum.
    pub fn run(self) -> Result<WalkResult> {
        let start = Instant::now();

        info!(
            nodes = self.graph.len(),
            edges = self.graph.edge_count(),
            workers = self.config.worker_count,
            "Starting graph walk"
        );

        if self.graph.is_empty() {
            return Ok(WalkResult {
                sum: 0,
                nodes_processed: 0,
                duration: start.elapsed(),
                completed: true,
            });
        }

        let worker_state = Arc::clone(&self.state);
        let handler = Arc::new(move |task: NodeTask| {
            if let Err(e) = worker_state.process_node(task.node) {
                worker_state.record_fatal(e);
            }
            worker_state.task_done();
        });

        let mut pool = ThreadPool::new(
            self.config.worker_count,
            Arc::clone(&self.queue),
            handler,
        )?;

        // Seed the traversal by processing the root inline; its frontier
        // lands on the queue as the first tasks the workers see.
        self.state.process_node(ROOT_NODE)?;

        let wait_result = self.state.wait_for_completion();

        pool.shutdown()?;
        wait_result?;

        let snapshot = self.state.snapshot();
        let stats = self.queue.stats();
        let duration = start.elapsed();
        let completed = !self.cancel.is_cancelled();

        info!(
            sum = snapshot.sum,
            processed = snapshot.processed,
            tasks = stats.enqueued_count(),
            duration_ms = duration.as_millis() as u64,
            completed,
            "Walk finished"
        );

        Ok(WalkResult {
            sum: snapshot.sum,
            nodes_processed: snapshot.processed,
            duration,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use std::path::PathBuf;

    fn config(workers: usize) -> WalkConfig {
        WalkConfig {
            input: PathBuf::from("test.in"),
            worker_count: workers,
            timeout: None,
            show_summary: false,
            verbose: false,
        }
    }

    fn graph(nodes: &[(i64, &[usize])]) -> Graph {
        Graph::new(
            nodes
                .iter()
                .map(|(value, neighbours)| Node {
                    value: *value,
                    neighbours: neighbours.to_vec(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_graph() {
        // Root 5 -> [1, 2], node 1 (3) -> [2], node 2 (7) -> []
        let g = graph(&[(5, &[1, 2]), (3, &[2]), (7, &[])]);
        let result = WalkCoordinator::new(config(4), g).run().unwrap();

        assert_eq!(result.sum, 15);
        assert_eq!(result.nodes_processed, 3);
        assert!(result.completed);
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let g = graph(&[(10, &[1]), (20, &[0])]);
        let result = WalkCoordinator::new(config(4), g).run().unwrap();

        assert_eq!(result.sum, 30);
        assert!(result.completed);
    }

    #[test]
    fn test_unreachable_node_excluded() {
        let g = graph(&[(4, &[]), (9, &[])]);
        let result = WalkCoordinator::new(config(2), g).run().unwrap();

        assert_eq!(result.sum, 4);
        assert_eq!(result.nodes_processed, 1);
    }

    #[test]
    fn test_empty_graph() {
        let result = WalkCoordinator::new(config(2), graph(&[])).run().unwrap();
        assert_eq!(result.sum, 0);
        assert_eq!(result.nodes_processed, 0);
        assert!(result.completed);
    }

    #[test]
    fn test_cancel_before_start_yields_empty_partial_sum() {
        let g = graph(&[(5, &[1]), (3, &[])]);
        let coordinator = WalkCoordinator::new(config(2), g);

        coordinator.cancel_token().cancel();
        let result = coordinator.run().unwrap();

        assert_eq!(result.sum, 0);
        assert_eq!(result.nodes_processed, 0);
        assert!(!result.completed);
    }
}
