//! Graph aggregate
//!
//! Owns the node and edge collections:
//! - nodes: NodeIndex -> Node (ascending index order)
//! - edges: edge key "<from>-<to>" -> Edge (insertion order)
//!
//! Read access is public. Structural mutation is crate-private and goes
//! through [`GraphService`](super::GraphService), which keeps node adjacency
//! lists and the overall orientation consistent with the edge map.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeOrientation, GraphOrientation, GraphType, NodeIndex};
use indexmap::IndexMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Graph {
    nodes: BTreeMap<NodeIndex, Node>,
    edges: IndexMap<String, Edge>,
    orientation: GraphOrientation,
    graph_type: GraphType,
}

impl Graph {
    /// Create an empty graph
    pub fn new(orientation: GraphOrientation) -> Self {
        Graph {
            nodes: BTreeMap::new(),
            edges: IndexMap::new(),
            orientation,
            graph_type: GraphType::Default,
        }
    }

    pub fn with_type(orientation: GraphOrientation, graph_type: GraphType) -> Self {
        let mut graph = Graph::new(orientation);
        graph.graph_type = graph_type;
        graph
    }

    pub fn orientation(&self) -> GraphOrientation {
        self.orientation
    }

    pub fn graph_type(&self) -> GraphType {
        self.graph_type
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in ascending index order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_indexes(&self) -> Vec<NodeIndex> {
        self.nodes.keys().copied().collect()
    }

    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(&index)
    }

    pub fn edge(&self, key: &str) -> Option<&Edge> {
        self.edges.get(key)
    }

    pub fn contains_node(&self, index: NodeIndex) -> bool {
        self.nodes.contains_key(&index)
    }

    pub fn contains_edge(&self, key: &str) -> bool {
        self.edges.contains_key(key)
    }

    /// Find a node by its non-empty label
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.label() == Some(label))
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(&index)
    }

    pub(crate) fn edge_mut(&mut self, key: &str) -> Option<&mut Edge> {
        self.edges.get_mut(key)
    }

    pub(crate) fn insert_node(&mut self, node: Node) {
        self.nodes.insert(node.index, node);
    }

    pub(crate) fn take_node(&mut self, index: NodeIndex) -> Option<Node> {
        self.nodes.remove(&index)
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.key().to_string(), edge);
    }

    /// Remove an edge preserving the order of the remaining ones
    pub(crate) fn take_edge(&mut self, key: &str) -> Option<Edge> {
        self.edges.shift_remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
        self.nodes.clear();
    }

    pub(crate) fn set_orientation(&mut self, orientation: GraphOrientation) {
        self.orientation = orientation;
    }

    pub(crate) fn set_graph_type(&mut self, graph_type: GraphType) {
        self.graph_type = graph_type;
    }

    /// Derive the orientation from the edge set; an empty edge set keeps the current one
    pub(crate) fn refresh_orientation(&mut self) {
        if let Some(derived) = derive_orientation(self.edges.values().map(|e| e.orientation)) {
            self.orientation = derived;
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new(GraphOrientation::NonOriented)
    }
}

/// All-same orientation maps to that orientation, anything else is MIXED
pub fn derive_orientation(
    orientations: impl IntoIterator<Item = EdgeOrientation>,
) -> Option<GraphOrientation> {
    let mut iter = orientations.into_iter();
    let first = iter.next()?;
    if iter.all(|o| o == first) {
        Some(first.into())
    } else {
        Some(GraphOrientation::Mixed)
    }
}
