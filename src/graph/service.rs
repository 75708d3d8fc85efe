//! Graph mutation and query engine
//!
//! The only sanctioned way to change a [`Graph`]. Every operation takes the
//! graph explicitly; the service keeps no state of its own.
//!
//! Invariants kept here:
//! - every edge in the edge map has both endpoints in the node map
//! - edge keys are unique
//! - each node's edge list matches the edges that reference it
//! - the graph orientation is derived from the edge orientations

use super::edge::Edge;
use super::node::{Node, Position};
use super::store::Graph;
use super::types::{EdgeIndex, EdgeOrientation, GraphOrientation, NodeIndex};
use crate::error::{GraphError, GraphResult};
use tracing::{debug, warn};

pub struct GraphService;

impl GraphService {
    /// Add a node, assigning the lowest free index when none is given
    pub fn add_node(
        graph: &mut Graph,
        index: Option<NodeIndex>,
        label: Option<String>,
    ) -> GraphResult<NodeIndex> {
        let index = index.unwrap_or_else(|| Self::calculate_new_node_index(graph));
        let mut node = Node::new(index);
        node.label = label;
        Self::insert_node(graph, node)
    }

    /// Add a labelled node with a synthetic index
    pub fn add_node_with_label(
        graph: &mut Graph,
        label: impl Into<String>,
    ) -> GraphResult<NodeIndex> {
        Self::add_node(graph, None, Some(label.into()))
    }

    /// Add a prepared node entity. Its edge list is reset; edges register
    /// themselves when added.
    pub fn insert_node(graph: &mut Graph, mut node: Node) -> GraphResult<NodeIndex> {
        let index = node.index;
        if index.as_u64() == 0 {
            return Err(GraphError::validation("node index must be a positive integer"));
        }
        check_label(node.label.as_deref())?;
        if graph.contains_node(index) {
            warn!("Rejected duplicate node {}", index);
            return Err(GraphError::duplicate_node(index));
        }
        node.edges.clear();
        graph.insert_node(node);
        debug!("Added node {}", index);
        Ok(index)
    }

    /// Remove a node together with every edge incident to it
    pub fn remove_node(graph: &mut Graph, index: NodeIndex) -> GraphResult<Node> {
        let incident = graph
            .node(index)
            .ok_or_else(|| GraphError::node_not_found(index))?
            .edges()
            .to_vec();

        for key in incident {
            if graph.contains_edge(&key) {
                Self::remove_edge(graph, &key)?;
            }
        }

        let node = graph
            .take_node(index)
            .ok_or_else(|| GraphError::node_not_found(index))?;
        debug!("Removed node {}", index);
        Ok(node)
    }

    /// Add an edge and register it on both endpoints
    pub fn add_edge(graph: &mut Graph, edge: Edge) -> GraphResult<()> {
        let key = edge.key().to_string();
        if graph.contains_edge(&key) {
            warn!("Rejected duplicate edge {}", key);
            return Err(GraphError::duplicate_edge(key));
        }
        for endpoint in [edge.first_node, edge.second_node] {
            if !graph.contains_node(endpoint) {
                return Err(GraphError::node_not_found(endpoint));
            }
        }

        for endpoint in [edge.first_node, edge.second_node] {
            if let Some(node) = graph.node_mut(endpoint) {
                node.register_edge(&key);
            }
        }
        graph.insert_edge(edge);
        graph.refresh_orientation();
        debug!("Added edge {}", key);
        Ok(())
    }

    /// Unregister an edge from its endpoints and delete it
    pub fn remove_edge(graph: &mut Graph, key: &str) -> GraphResult<Edge> {
        let (first, second) = match graph.edge(key) {
            Some(edge) => (edge.first_node, edge.second_node),
            None => return Err(GraphError::edge_not_found(key)),
        };

        for endpoint in [first, second] {
            if let Some(node) = graph.node_mut(endpoint) {
                node.unregister_edge(key);
            }
        }
        let edge = graph
            .take_edge(key)
            .ok_or_else(|| GraphError::edge_not_found(key))?;
        graph.refresh_orientation();
        debug!("Removed edge {}", key);
        Ok(edge)
    }

    /// Bulk clear of both collections
    pub fn clear_all(graph: &mut Graph) {
        graph.clear();
        debug!("Cleared graph");
    }

    /// Edges incident to a node, resolved from its edge list
    ///
    /// Keys that no longer resolve are skipped and logged.
    pub fn get_adjacent_edges(graph: &Graph, index: NodeIndex) -> GraphResult<Vec<&Edge>> {
        let node = graph
            .node(index)
            .ok_or_else(|| GraphError::node_not_found(index))?;

        let mut edges = Vec::with_capacity(node.edges().len());
        for key in node.edges() {
            match graph.edge(key) {
                Some(edge) => edges.push(edge),
                None => warn!("Node {} references missing edge {}", index, key),
            }
        }
        Ok(edges)
    }

    /// Neighbours of a node
    ///
    /// Without orientation, or in an ORIENTED graph, only successors (edges
    /// where the node is `first_node`) count. Otherwise every edge is treated
    /// as bidirectional.
    pub fn get_adjacent_nodes(
        graph: &Graph,
        index: NodeIndex,
        consider_orientation: bool,
    ) -> GraphResult<Vec<NodeIndex>> {
        let successors_only =
            !consider_orientation || graph.orientation() == GraphOrientation::Oriented;

        let mut result = Vec::new();
        for edge in Self::get_adjacent_edges(graph, index)? {
            let neighbour = if successors_only {
                if edge.first_node == index {
                    Some(edge.second_node)
                } else {
                    None
                }
            } else {
                edge.opposite(index)
            };
            if let Some(neighbour) = neighbour {
                if !result.contains(&neighbour) {
                    result.push(neighbour);
                }
            }
        }
        Ok(result)
    }

    /// Opposite endpoints of all incident edges, ignoring direction
    pub fn get_connected_nodes(graph: &Graph, index: NodeIndex) -> GraphResult<Vec<NodeIndex>> {
        let mut result = Vec::new();
        for edge in Self::get_adjacent_edges(graph, index)? {
            if let Some(neighbour) = edge.opposite(index) {
                if !result.contains(&neighbour) {
                    result.push(neighbour);
                }
            }
        }
        Ok(result)
    }

    /// Direction-sensitive existence check; the reverse key is not consulted
    pub fn is_edge_exists(graph: &Graph, first: NodeIndex, second: NodeIndex) -> bool {
        graph.contains_edge(EdgeIndex::new(first, second).as_str())
    }

    /// Lowest positive index not in use
    pub fn calculate_new_node_index(graph: &Graph) -> NodeIndex {
        let mut candidate = 1;
        // node_indexes ascend, so the first gap is the answer
        for index in graph.nodes().map(|n| n.index.as_u64()) {
            if index != candidate {
                break;
            }
            candidate += 1;
        }
        NodeIndex(candidate)
    }

    /// Switch the graph orientation
    ///
    /// ORIENTED and NON_ORIENTED rewrite every edge; MIXED keeps the edges and
    /// is re-derived from them.
    pub fn set_orientation(graph: &mut Graph, orientation: GraphOrientation) {
        let edge_orientation = match orientation {
            GraphOrientation::Oriented => Some(EdgeOrientation::Oriented),
            GraphOrientation::NonOriented => Some(EdgeOrientation::NonOriented),
            GraphOrientation::Mixed => None,
        };
        graph.set_orientation(orientation);
        if let Some(edge_orientation) = edge_orientation {
            let keys: Vec<String> = graph.edges().map(|e| e.key().to_string()).collect();
            for key in keys {
                if let Some(edge) = graph.edge_mut(&key) {
                    edge.orientation = edge_orientation;
                }
            }
        }
        graph.refresh_orientation();
        debug!("Graph orientation set to {:?}", graph.orientation());
    }

    pub fn set_edge_orientation(
        graph: &mut Graph,
        key: &str,
        orientation: EdgeOrientation,
    ) -> GraphResult<()> {
        let edge = graph
            .edge_mut(key)
            .ok_or_else(|| GraphError::edge_not_found(key))?;
        edge.orientation = orientation;
        graph.refresh_orientation();
        Ok(())
    }

    pub fn set_edge_weight(graph: &mut Graph, key: &str, weight: f64) -> GraphResult<()> {
        if !weight.is_finite() {
            return Err(GraphError::validation(format!("invalid weight {}", weight)));
        }
        let edge = graph
            .edge_mut(key)
            .ok_or_else(|| GraphError::edge_not_found(key))?;
        edge.weight = weight;
        Ok(())
    }

    pub fn set_edge_label(graph: &mut Graph, key: &str, label: Option<String>) -> GraphResult<()> {
        let edge = graph
            .edge_mut(key)
            .ok_or_else(|| GraphError::edge_not_found(key))?;
        edge.label = label;
        Ok(())
    }

    pub fn set_node_label(
        graph: &mut Graph,
        index: NodeIndex,
        label: Option<String>,
    ) -> GraphResult<()> {
        check_label(label.as_deref())?;
        let node = graph
            .node_mut(index)
            .ok_or_else(|| GraphError::node_not_found(index))?;
        node.label = label;
        Ok(())
    }

    pub fn set_node_position(
        graph: &mut Graph,
        index: NodeIndex,
        position: Position,
    ) -> GraphResult<()> {
        let node = graph
            .node_mut(index)
            .ok_or_else(|| GraphError::node_not_found(index))?;
        node.position = Some(position);
        Ok(())
    }

    /// Turn `a-b` into `b-a`, keeping weight, label and orientation
    pub fn reverse_edge(graph: &mut Graph, key: &str) -> GraphResult<String> {
        let reversed_key = match graph.edge(key) {
            Some(edge) => edge.edge_index().reversed().value,
            None => return Err(GraphError::edge_not_found(key)),
        };
        if reversed_key != key && graph.contains_edge(&reversed_key) {
            return Err(GraphError::duplicate_edge(reversed_key));
        }

        let mut edge = Self::remove_edge(graph, key)?;
        edge.reverse();
        Self::add_edge(graph, edge)?;
        Ok(reversed_key)
    }
}

/// Labels are written as `'label'` in set notation, so they cannot hold a quote
fn check_label(label: Option<&str>) -> GraphResult<()> {
    match label {
        Some(label) if label.contains('\'') => Err(GraphError::validation(format!(
            "node label {:?} must not contain a single quote",
            label
        ))),
        _ => Ok(()),
    }
}
