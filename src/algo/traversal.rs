//! Breadth-first and depth-first traversal
//!
//! Both record the edge that first discovers each node and follow
//! orientation-aware adjacency.

use super::{Algorithm, AlgorithmCalculator, AlgorithmResult, CancellationFlag};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, GraphService, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Edge that discovered `second_node` from `first_node`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalEdge {
    pub first_node: NodeIndex,
    pub second_node: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalResult {
    pub algorithm: Algorithm,
    pub start_node: NodeIndex,
    pub edges: Vec<TraversalEdge>,
    /// Reached nodes, start included
    pub discovered: usize,
}

fn ensure_node(graph: &Graph, index: NodeIndex) -> GraphResult<()> {
    if graph.contains_node(index) {
        Ok(())
    } else {
        Err(GraphError::node_not_found(index))
    }
}

pub struct BfsCalculator {
    pub start_node: NodeIndex,
}

impl AlgorithmCalculator for BfsCalculator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn calculate(&self, graph: &Graph, cancel: &CancellationFlag) -> GraphResult<AlgorithmResult> {
        ensure_node(graph, self.start_node)?;

        let mut visited = HashSet::from([self.start_node]);
        let mut queue = VecDeque::from([self.start_node]);
        let mut edges = Vec::new();

        while let Some(current) = queue.pop_front() {
            cancel.check()?;
            for next in GraphService::get_adjacent_nodes(graph, current, true)? {
                if visited.insert(next) {
                    edges.push(TraversalEdge {
                        first_node: current,
                        second_node: next,
                    });
                    queue.push_back(next);
                }
            }
        }

        Ok(AlgorithmResult::Traversal(TraversalResult {
            algorithm: Algorithm::Bfs,
            start_node: self.start_node,
            edges,
            discovered: visited.len(),
        }))
    }
}

pub struct DfsCalculator {
    pub start_node: NodeIndex,
}

impl AlgorithmCalculator for DfsCalculator {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    /// Explicit-stack form of the recursive visit; each frame keeps its
    /// neighbour list and cursor so discovery order matches recursion.
    fn calculate(&self, graph: &Graph, cancel: &CancellationFlag) -> GraphResult<AlgorithmResult> {
        ensure_node(graph, self.start_node)?;

        let mut visited = HashSet::from([self.start_node]);
        let mut edges = Vec::new();
        let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = vec![(
            self.start_node,
            GraphService::get_adjacent_nodes(graph, self.start_node, true)?,
            0,
        )];

        while let Some((current, neighbours, cursor)) = stack.last_mut() {
            cancel.check()?;
            let Some(&next) = neighbours.get(*cursor) else {
                stack.pop();
                continue;
            };
            *cursor += 1;
            if visited.insert(next) {
                edges.push(TraversalEdge {
                    first_node: *current,
                    second_node: next,
                });
                let next_neighbours = GraphService::get_adjacent_nodes(graph, next, true)?;
                stack.push((next, next_neighbours, 0));
            }
        }

        Ok(AlgorithmResult::Traversal(TraversalResult {
            algorithm: Algorithm::Dfs,
            start_node: self.start_node,
            edges,
            discovered: visited.len(),
        }))
    }
}
