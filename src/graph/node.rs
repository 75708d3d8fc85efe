//! Node entity
//!
//! A node is identified by its positive index and keeps the keys of the
//! edges incident to it. The owning graph is the arena; nodes never hold
//! references to edges.

use super::types::NodeIndex;
use serde::{Deserialize, Serialize};

/// Canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A vertex of the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// 1-based index, unique within the graph
    pub index: NodeIndex,

    /// Optional display label
    #[serde(default)]
    pub label: Option<String>,

    /// Keys of incident edges, in registration order
    #[serde(default)]
    pub(crate) edges: Vec<String>,

    /// Canvas position, only carried by the full JSON form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Fill color, only carried by the full JSON form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Node {
    pub fn new(index: impl Into<NodeIndex>) -> Self {
        Node {
            index: index.into(),
            label: None,
            edges: Vec::new(),
            position: None,
            color: None,
        }
    }

    pub fn with_label(index: impl Into<NodeIndex>, label: impl Into<String>) -> Self {
        let mut node = Node::new(index);
        node.label = Some(label.into());
        node
    }

    /// Label if set and non-empty
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Keys of incident edges
    pub fn edges(&self) -> &[String] {
        &self.edges
    }

    /// Set-notation token: `'label'` when labelled, the bare index otherwise
    pub fn token(&self) -> String {
        match self.label() {
            Some(label) => format!("'{}'", label),
            None => self.index.to_string(),
        }
    }

    pub(crate) fn register_edge(&mut self, key: &str) {
        if !self.edges.iter().any(|e| e == key) {
            self.edges.push(key.to_string());
        }
    }

    pub(crate) fn unregister_edge(&mut self, key: &str) {
        self.edges.retain(|e| e != key);
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
