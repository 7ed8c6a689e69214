//! Error types for graph-walker
//!
//! This module defines the error hierarchy covering:
//! - Graph input and validation errors
//! - Configuration and CLI errors
//! - Worker pool errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what went wrong
//! - Logical impossibilities (bad node indices) are fatal, never ignored

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the graph-walker application
#[derive(Error, Debug)]
pub enum WalkerError {
    /// Graph input or validation errors
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Graph input and validation errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Input file could not be opened or read
    #[error("Failed to read graph file '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input text did not match the expected format
    #[error("Malformed graph input at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// A neighbour list references a node that does not exist
    #[error("Neighbour index {index} of node {node} is outside [0, {count})")]
    NeighbourOutOfRange {
        node: usize,
        index: usize,
        count: usize,
    },

    /// A task referenced a node outside the graph
    #[error("Task requested node {index} but the graph has {count} nodes")]
    NodeOutOfRange { index: usize, count: usize },

    /// Node count exceeds the supported maximum
    #[error("Graph has {count} nodes, exceeding the supported maximum of {max}")]
    TooLarge { count: usize, max: usize },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Invalid timeout value
    #[error("Invalid timeout {secs}s: must be at least 1 second")]
    InvalidTimeout { secs: u64 },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked while executing a task body
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },

    /// Task submitted after the queue was finalized
    #[error(transparent)]
    QueueClosed(#[from] crate::pool::queue::QueueClosed),
}

/// Result type alias for WalkerError
pub type Result<T> = std::result::Result<T, WalkerError>;

/// Result type alias for GraphError
pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let graph_err = GraphError::NodeOutOfRange {
            index: 12,
            count: 10,
        };
        let walker_err: WalkerError = graph_err.into();
        assert!(matches!(walker_err, WalkerError::Graph(_)));
    }

    #[test]
    fn test_error_messages_include_context() {
        let err = GraphError::NeighbourOutOfRange {
            node: 3,
            index: 99,
            count: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("node 3"));

        let err = ConfigError::InvalidWorkerCount { count: 0, max: 512 };
        assert!(err.to_string().contains("between 1 and 512"));
    }
}
