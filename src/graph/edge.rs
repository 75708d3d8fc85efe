//! Edge entity
//!
//! Edges refer to their endpoints by index; the graph owns the nodes.

use super::json::EdgeAttributes;
use super::types::{EdgeIndex, EdgeOrientation, NodeIndex};

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An edge between two nodes of the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Tail for oriented edges
    pub first_node: NodeIndex,

    /// Head for oriented edges
    pub second_node: NodeIndex,

    pub orientation: EdgeOrientation,

    pub weight: f64,

    pub label: Option<String>,

    /// Stroke color, only carried by the full JSON form
    pub color: Option<String>,

    edge_index: EdgeIndex,
}

impl Edge {
    /// Create an edge with the default weight
    pub fn new(
        first_node: impl Into<NodeIndex>,
        second_node: impl Into<NodeIndex>,
        orientation: EdgeOrientation,
    ) -> Self {
        let first_node = first_node.into();
        let second_node = second_node.into();
        Edge {
            first_node,
            second_node,
            orientation,
            weight: DEFAULT_WEIGHT,
            label: None,
            color: None,
            edge_index: EdgeIndex::new(first_node, second_node),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn edge_index(&self) -> &EdgeIndex {
        &self.edge_index
    }

    /// Key of this edge in the graph's edge map
    pub fn key(&self) -> &str {
        self.edge_index.as_str()
    }

    pub fn is_loop(&self) -> bool {
        self.first_node == self.second_node
    }

    pub fn is_oriented(&self) -> bool {
        self.orientation == EdgeOrientation::Oriented
    }

    /// Check if this edge touches a node as either endpoint
    pub fn touches(&self, node: NodeIndex) -> bool {
        self.first_node == node || self.second_node == node
    }

    /// The endpoint across from `node`, ignoring direction
    pub fn opposite(&self, node: NodeIndex) -> Option<NodeIndex> {
        if self.first_node == node {
            Some(self.second_node)
        } else if self.second_node == node {
            Some(self.first_node)
        } else {
            None
        }
    }

    /// Swap endpoints, re-keying the edge
    pub(crate) fn reverse(&mut self) {
        std::mem::swap(&mut self.first_node, &mut self.second_node);
        self.edge_index = EdgeIndex::new(self.first_node, self.second_node);
    }
}

impl Edge {
    pub(crate) fn attributes(&self, with_display: bool) -> EdgeAttributes {
        EdgeAttributes {
            edge_index: self.edge_index.clone(),
            label: self.label.clone(),
            orientation: self.orientation,
            weight: self.weight,
            color: if with_display { self.color.clone() } else { None },
        }
    }

    pub(crate) fn from_attributes(attributes: EdgeAttributes) -> Self {
        let EdgeAttributes {
            edge_index,
            label,
            orientation,
            weight,
            color,
        } = attributes;
        Edge {
            first_node: edge_index.from,
            second_node: edge_index.to,
            orientation,
            weight,
            label,
            color,
            edge_index,
        }
    }
}
