//! Graph algorithms
//!
//! Calculators run against a read-only graph snapshot. A request names the
//! algorithm through its `algorithm` tag; [`AlgorithmResolver`] turns it into
//! the matching [`AlgorithmCalculator`]. The [`worker`] module runs them off
//! the caller's task.

pub mod pathfinding;
pub mod priority_queue;
pub mod traversal;
pub mod worker;

pub use pathfinding::{CheckedPath, DijkstraCalculator, PathResult};
pub use priority_queue::PriorityQueue;
pub use traversal::{BfsCalculator, DfsCalculator, TraversalEdge, TraversalResult};
pub use worker::{AlgorithmJob, AlgorithmWorker, WorkerRequest, WorkerResponse};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    Dfs,
    Bfs,
    Dijkstra,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Bfs => "BFS",
            Algorithm::Dijkstra => "DIJKSTRA",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DFS" => Ok(Algorithm::Dfs),
            "BFS" => Ok(Algorithm::Bfs),
            "DIJKSTRA" => Ok(Algorithm::Dijkstra),
            _ => Err(GraphError::validation(format!("unsupported algorithm: {}", s))),
        }
    }
}

/// Algorithm request, tagged by `algorithm`
///
/// ```json
/// {"algorithm": "DIJKSTRA", "startNode": 1, "endNode": 4}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlgorithmRequest {
    Dfs {
        #[serde(rename = "startNode")]
        start_node: NodeIndex,
    },
    Bfs {
        #[serde(rename = "startNode")]
        start_node: NodeIndex,
    },
    Dijkstra {
        #[serde(rename = "startNode")]
        start_node: NodeIndex,
        #[serde(rename = "endNode")]
        end_node: NodeIndex,
    },
}

impl AlgorithmRequest {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmRequest::Dfs { .. } => Algorithm::Dfs,
            AlgorithmRequest::Bfs { .. } => Algorithm::Bfs,
            AlgorithmRequest::Dijkstra { .. } => Algorithm::Dijkstra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmResult {
    ShortestPath(PathResult),
    Traversal(TraversalResult),
}

/// Capability shared by every algorithm
pub trait AlgorithmCalculator: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn calculate(&self, graph: &Graph, cancel: &CancellationFlag) -> GraphResult<AlgorithmResult>;
}

pub struct AlgorithmResolver;

impl AlgorithmResolver {
    pub fn resolve(request: &AlgorithmRequest) -> Box<dyn AlgorithmCalculator> {
        match *request {
            AlgorithmRequest::Dfs { start_node } => Box::new(DfsCalculator { start_node }),
            AlgorithmRequest::Bfs { start_node } => Box::new(BfsCalculator { start_node }),
            AlgorithmRequest::Dijkstra {
                start_node,
                end_node,
            } => Box::new(DijkstraCalculator {
                start_node,
                end_node,
            }),
        }
    }

    pub fn run(
        request: &AlgorithmRequest,
        graph: &Graph,
        cancel: &CancellationFlag,
    ) -> GraphResult<AlgorithmResult> {
        Self::resolve(request).calculate(graph, cancel)
    }
}

/// Shared cancellation signal between a job handle and its calculator
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called
    pub fn check(&self) -> GraphResult<()> {
        if self.is_cancelled() {
            Err(GraphError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeOrientation, GraphOrientation, GraphService};

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("BFS".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        let err = "A_STAR".parse::<Algorithm>().unwrap_err();
        assert!(err.to_string().contains("unsupported algorithm"));
    }

    #[test]
    fn test_request_wire_format() {
        let request: AlgorithmRequest =
            serde_json::from_str(r#"{"algorithm":"DIJKSTRA","startNode":1,"endNode":4}"#).unwrap();
        assert_eq!(
            request,
            AlgorithmRequest::Dijkstra {
                start_node: NodeIndex(1),
                end_node: NodeIndex(4)
            }
        );
        assert_eq!(request.algorithm(), Algorithm::Dijkstra);

        let json = serde_json::to_value(AlgorithmRequest::Bfs {
            start_node: NodeIndex(2),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"algorithm": "BFS", "startNode": 2}));
    }

    #[test]
    fn test_resolver_dispatch() {
        let mut graph = Graph::new(GraphOrientation::NonOriented);
        GraphService::add_node(&mut graph, None, None).unwrap();
        GraphService::add_node(&mut graph, None, None).unwrap();
        GraphService::add_edge(&mut graph, Edge::new(1, 2, EdgeOrientation::NonOriented)).unwrap();

        let requests = [
            AlgorithmRequest::Dfs { start_node: NodeIndex(1) },
            AlgorithmRequest::Bfs { start_node: NodeIndex(1) },
            AlgorithmRequest::Dijkstra {
                start_node: NodeIndex(1),
                end_node: NodeIndex(2),
            },
        ];
        for request in &requests {
            let calculator = AlgorithmResolver::resolve(request);
            assert_eq!(calculator.algorithm(), request.algorithm());
            let result = calculator.calculate(&graph, &CancellationFlag::new()).unwrap();
            match (request.algorithm(), result) {
                (Algorithm::Dijkstra, AlgorithmResult::ShortestPath(path)) => {
                    assert_eq!(path.distance, 1.0)
                }
                (_, AlgorithmResult::Traversal(traversal)) => assert_eq!(traversal.discovered, 2),
                (algorithm, other) => panic!("{} produced {:?}", algorithm, other),
            }
        }
    }

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let handle = flag.clone();
        assert!(flag.check().is_ok());
        handle.cancel();
        assert!(flag.is_cancelled());
        assert!(matches!(flag.check(), Err(GraphError::Cancelled)));
    }
}
