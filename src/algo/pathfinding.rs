//! Dijkstra shortest path
//!
//! Every relaxation attempt is recorded as a checked path, improving or not,
//! so callers can replay the search.

use super::priority_queue::PriorityQueue;
use super::{Algorithm, AlgorithmCalculator, AlgorithmResult, CancellationFlag};
use crate::error::{GraphError, GraphResult};
use crate::graph::{EdgeIndex, Graph, GraphOrientation, GraphService, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedPath {
    pub current_node: NodeIndex,
    pub neighbor_node: NodeIndex,
    /// Candidate distance to `neighbor_node` through `current_node`
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    pub start_node: NodeIndex,
    pub end_node: NodeIndex,
    pub distance: f64,
    pub path: Vec<NodeIndex>,
    pub checked_paths: Vec<CheckedPath>,
}

pub struct DijkstraCalculator {
    pub start_node: NodeIndex,
    pub end_node: NodeIndex,
}

impl AlgorithmCalculator for DijkstraCalculator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn calculate(&self, graph: &Graph, cancel: &CancellationFlag) -> GraphResult<AlgorithmResult> {
        for index in [self.start_node, self.end_node] {
            if !graph.contains_node(index) {
                return Err(GraphError::node_not_found(index));
            }
        }

        let mut distances: HashMap<NodeIndex, f64> = graph
            .node_indexes()
            .into_iter()
            .map(|index| (index, f64::INFINITY))
            .collect();
        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited = HashSet::new();
        let mut checked_paths = Vec::new();
        let mut queue = PriorityQueue::new();

        distances.insert(self.start_node, 0.0);
        queue.insert(self.start_node, 0.0);

        while let Some((current, distance)) = queue.extract_min() {
            cancel.check()?;
            // stale entry left behind by a later improvement
            if !visited.insert(current) {
                continue;
            }

            if current == self.end_node {
                let path = reconstruct_path(&previous, self.start_node, self.end_node);
                debug!(
                    "Dijkstra {} -> {}: distance {}, {} relaxations",
                    self.start_node,
                    self.end_node,
                    distance,
                    checked_paths.len()
                );
                return Ok(AlgorithmResult::ShortestPath(PathResult {
                    start_node: self.start_node,
                    end_node: self.end_node,
                    distance,
                    path,
                    checked_paths,
                }));
            }

            for neighbor in GraphService::get_adjacent_nodes(graph, current, true)? {
                if visited.contains(&neighbor) {
                    continue;
                }
                let candidate = distance + edge_weight(graph, current, neighbor)?;
                checked_paths.push(CheckedPath {
                    current_node: current,
                    neighbor_node: neighbor,
                    distance: candidate,
                });

                let best = distances.get(&neighbor).copied().unwrap_or(f64::INFINITY);
                if candidate < best {
                    distances.insert(neighbor, candidate);
                    previous.insert(neighbor, current);
                    queue.insert(neighbor, candidate);
                }
            }
        }

        Err(GraphError::NoPathFound {
            start: self.start_node.as_u64(),
            end: self.end_node.as_u64(),
        })
    }
}

/// Weight of the edge walked from `current` to `neighbor`
///
/// Oriented graphs only accept the forward key; otherwise the reverse key is
/// the fallback.
fn edge_weight(graph: &Graph, current: NodeIndex, neighbor: NodeIndex) -> GraphResult<f64> {
    let forward = EdgeIndex::new(current, neighbor);
    let edge = match graph.edge(forward.as_str()) {
        Some(edge) => edge,
        None if graph.orientation() != GraphOrientation::Oriented => graph
            .edge(forward.reversed().as_str())
            .ok_or_else(|| GraphError::edge_not_found(forward.as_str()))?,
        None => return Err(GraphError::edge_not_found(forward.as_str())),
    };
    if edge.weight < 0.0 {
        return Err(GraphError::validation(format!(
            "edge {} has negative weight {}",
            edge.key(),
            edge.weight
        )));
    }
    Ok(edge.weight)
}

fn reconstruct_path(
    previous: &HashMap<NodeIndex, NodeIndex>,
    start: NodeIndex,
    end: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match previous.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
