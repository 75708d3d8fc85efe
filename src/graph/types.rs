//! Core type definitions for the graph model

use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positive, 1-based identifier of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeIndex(pub u64);

impl NodeIndex {
    pub fn new(index: u64) -> Self {
        NodeIndex(index)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeIndex {
    fn from(index: u64) -> Self {
        NodeIndex(index)
    }
}

/// Direction-sensitive edge key `"<from>-<to>"`
///
/// An edge and its logical reverse have different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeIndex {
    pub value: String,
    pub from: NodeIndex,
    pub to: NodeIndex,
}

impl EdgeIndex {
    pub fn new(from: impl Into<NodeIndex>, to: impl Into<NodeIndex>) -> Self {
        let from = from.into();
        let to = to.into();
        EdgeIndex {
            value: format!("{}-{}", from, to),
            from,
            to,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Key of the logical reverse edge
    pub fn reversed(&self) -> Self {
        EdgeIndex::new(self.to, self.from)
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for EdgeIndex {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| GraphError::validation(format!("invalid edge index '{}'", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u64>()
                .map_err(|_| GraphError::validation(format!("invalid edge index '{}'", s)))
        };
        Ok(EdgeIndex::new(parse(from)?, parse(to)?))
    }
}

/// Orientation of a single edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeOrientation {
    Oriented,
    NonOriented,
}

/// Overall orientation of a graph, derived from its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphOrientation {
    Oriented,
    NonOriented,
    Mixed,
}

impl GraphOrientation {
    /// Edge orientation new edges get by default in a graph of this orientation
    pub fn default_edge_orientation(&self) -> EdgeOrientation {
        match self {
            GraphOrientation::Oriented => EdgeOrientation::Oriented,
            GraphOrientation::NonOriented | GraphOrientation::Mixed => EdgeOrientation::NonOriented,
        }
    }
}

impl From<EdgeOrientation> for GraphOrientation {
    fn from(orientation: EdgeOrientation) -> Self {
        match orientation {
            EdgeOrientation::Oriented => GraphOrientation::Oriented,
            EdgeOrientation::NonOriented => GraphOrientation::NonOriented,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GraphType {
    #[default]
    Default,
    Tree,
}
