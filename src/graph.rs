//! In-memory graph store and input parsing
//!
//! The graph is loaded once, validated, and never mutated afterwards. The
//! traversal engine only requires stable integer node indices in `[0, N)`.
//!
//! # Input format
//!
//! Plain text, whitespace separated. The first significant line is the node
//! count `N`, followed by exactly `N` lines of the form:
//!
//! ```text
//! <value> <k> <n_1> ... <n_k>
//! ```
//!
//! where `value` is the node's integer value, `k` the neighbour count, and
//! `n_1..n_k` the neighbour indices. Blank lines and lines starting with `#`
//! are ignored. Edges are directed as listed; an undirected graph lists each
//! edge in both endpoints' neighbour lists.

use crate::error::{GraphError, GraphResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Maximum supported node count
///
/// Requests for nodes beyond this bound are input defects, not workload
/// limits; the cap keeps a corrupt count line from triggering a huge
/// allocation.
pub const MAX_NODES: usize = 1_000_000;

/// A single graph node: its value and its outgoing edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Value folded into the traversal sum when this node is visited
    pub value: i64,

    /// Indices of adjacent nodes, in input order
    pub neighbours: Vec<usize>,
}

/// Immutable adjacency structure, nodes indexed `0..len()`
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Build a graph from already-parsed nodes, validating every edge.
    pub fn new(nodes: Vec<Node>) -> GraphResult<Self> {
        let count = nodes.len();
        if count > MAX_NODES {
            return Err(GraphError::TooLarge {
                count,
                max: MAX_NODES,
            });
        }

        for (idx, node) in nodes.iter().enumerate() {
            for &neighbour in &node.neighbours {
                if neighbour >= count {
                    return Err(GraphError::NeighbourOutOfRange {
                        node: idx,
                        index: neighbour,
                        count,
                    });
                }
            }
        }

        Ok(Self { nodes })
    }

    /// Load and validate a graph from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> GraphResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GraphError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            nodes = graph.len(),
            edges = graph.edge_count(),
            "Graph loaded"
        );
        Ok(graph)
    }

    /// Parse and validate a graph from any reader.
    pub fn from_reader<R: Read>(reader: R) -> GraphResult<Self> {
        let mut lines = BufReader::new(reader)
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line));

        let mut next_significant = || -> GraphResult<Option<(usize, String)>> {
            for (line_no, line) in lines.by_ref() {
                let line = line.map_err(|e| GraphError::Parse {
                    line: line_no,
                    reason: e.to_string(),
                })?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                return Ok(Some((line_no, trimmed.to_string())));
            }
            Ok(None)
        };

        let (count_line, count_text) =
            next_significant()?.ok_or_else(|| GraphError::Parse {
                line: 1,
                reason: "missing node count".into(),
            })?;

        let count: usize = count_text.parse().map_err(|_| GraphError::Parse {
            line: count_line,
            reason: format!("invalid node count '{count_text}'"),
        })?;

        if count > MAX_NODES {
            return Err(GraphError::TooLarge {
                count,
                max: MAX_NODES,
            });
        }

        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            let (line_no, text) = next_significant()?.ok_or_else(|| GraphError::Parse {
                line: count_line,
                reason: format!("expected {} node lines, found {}", count, nodes.len()),
            })?;
            nodes.push(parse_node_line(line_no, &text)?);
        }

        Self::new(nodes)
    }

    /// Number of nodes in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by index
    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// All nodes, in index order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbours.len()).sum()
    }

    /// Sum of every node value, reachable or not (diagnostics only)
    pub fn total_value(&self) -> i64 {
        self.nodes.iter().map(|n| n.value).sum()
    }
}

/// Parse one `value k n_1 .. n_k` node line.
fn parse_node_line(line_no: usize, text: &str) -> GraphResult<Node> {
    let mut tokens = text.split_whitespace();

    let value: i64 = tokens
        .next()
        .ok_or_else(|| GraphError::Parse {
            line: line_no,
            reason: "missing node value".into(),
        })?
        .parse()
        .map_err(|_| GraphError::Parse {
            line: line_no,
            reason: "invalid node value".into(),
        })?;

    let neighbour_count: usize = tokens
        .next()
        .ok_or_else(|| GraphError::Parse {
            line: line_no,
            reason: "missing neighbour count".into(),
        })?
        .parse()
        .map_err(|_| GraphError::Parse {
            line: line_no,
            reason: "invalid neighbour count".into(),
        })?;

    let neighbours = tokens
        .map(|t| {
            t.parse::<usize>().map_err(|_| GraphError::Parse {
                line: line_no,
                reason: format!("invalid neighbour index '{t}'"),
            })
        })
        .collect::<GraphResult<Vec<_>>>()?;

    if neighbours.len() != neighbour_count {
        return Err(GraphError::Parse {
            line: line_no,
            reason: format!(
                "declared {} neighbours, found {}",
                neighbour_count,
                neighbours.len()
            ),
        });
    }

    Ok(Node { value, neighbours })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> GraphResult<Graph> {
        Graph::from_reader(input.as_bytes())
    }

    #[test]
    fn test_parse_basic() {
        let graph = parse("3\n5 2 1 2\n3 1 2\n7 0\n").unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node(0).unwrap().value, 5);
        assert_eq!(graph.node(0).unwrap().neighbours, vec![1, 2]);
        assert_eq!(graph.node(2).unwrap().neighbours, Vec::<usize>::new());
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.total_value(), 15);
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let graph = parse("# sample graph\n\n2\n10 1 1\n\n# node 1\n20 1 0\n").unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.node(1).unwrap().value, 20);
    }

    #[test]
    fn test_parse_negative_values() {
        let graph = parse("2\n-4 1 1\n9 0\n").unwrap();
        assert_eq!(graph.node(0).unwrap().value, -4);
        assert_eq!(graph.total_value(), 5);
    }

    #[test]
    fn test_parse_empty_graph() {
        let graph = parse("0\n").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_parse_missing_count() {
        assert!(matches!(parse(""), Err(GraphError::Parse { .. })));
        assert!(matches!(parse("# only comments\n"), Err(GraphError::Parse { .. })));
    }

    #[test]
    fn test_parse_too_few_node_lines() {
        let err = parse("3\n1 0\n2 0\n").unwrap_err();
        assert!(matches!(err, GraphError::Parse { .. }));
    }

    #[test]
    fn test_parse_neighbour_count_mismatch() {
        let err = parse("1\n5 2 0\n").unwrap_err();
        match err {
            GraphError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("declared 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_neighbour_out_of_range() {
        let err = parse("2\n1 1 5\n2 0\n").unwrap_err();
        assert!(matches!(
            err,
            GraphError::NeighbourOutOfRange {
                node: 0,
                index: 5,
                count: 2
            }
        ));
    }

    #[test]
    fn test_self_loop_is_valid() {
        let graph = parse("1\n5 1 0\n").unwrap();
        assert_eq!(graph.node(0).unwrap().neighbours, vec![0]);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Graph::from_path("/nonexistent/graph.in").unwrap_err();
        assert!(matches!(err, GraphError::ReadFailed { .. }));
    }
}
