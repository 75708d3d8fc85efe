//! JSON forms of a graph
//!
//! Both forms share the shape
//! `{nodes: [[index, node], ...], edges: [[key, edge], ...], orientation, type}`.
//! The compact form carries index/label essentials only; the full form keeps
//! adjacency lists and display metadata and is what crosses the worker boundary.

use super::edge::Edge;
use super::node::Node;
use super::service::GraphService;
use super::store::Graph;
use super::types::{EdgeIndex, EdgeOrientation, GraphOrientation, GraphType, NodeIndex};
use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Compact node form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeJson {
    pub index: NodeIndex,
    #[serde(default)]
    pub label: Option<String>,
}

impl From<&Node> for NodeJson {
    fn from(node: &Node) -> Self {
        NodeJson {
            index: node.index,
            label: node.label.clone(),
        }
    }
}

/// Edge fields shared by both JSON forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeAttributes {
    pub edge_index: EdgeIndex,
    #[serde(default)]
    pub label: Option<String>,
    pub orientation: EdgeOrientation,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_weight() -> f64 {
    super::edge::DEFAULT_WEIGHT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeJson<N> {
    pub first_node: N,
    pub second_node: N,
    #[serde(flatten)]
    pub attributes: EdgeAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphJson<N = NodeJson> {
    pub nodes: Vec<(NodeIndex, N)>,
    pub edges: Vec<(String, EdgeJson<N>)>,
    pub orientation: GraphOrientation,
    #[serde(rename = "type", default)]
    pub graph_type: GraphType,
}

/// Lossless form used to hand a snapshot to the algorithm worker
pub type GraphFullJson = GraphJson<Node>;

impl Graph {
    /// Compact form: index/label, weight and orientation only
    pub fn to_json(&self) -> GraphJson {
        let node_json = |index: NodeIndex| {
            self.node(index)
                .map(NodeJson::from)
                .unwrap_or(NodeJson { index, label: None })
        };
        GraphJson {
            nodes: self.nodes().map(|n| (n.index, NodeJson::from(n))).collect(),
            edges: self
                .edges()
                .map(|e| {
                    (
                        e.key().to_string(),
                        EdgeJson {
                            first_node: node_json(e.first_node),
                            second_node: node_json(e.second_node),
                            attributes: e.attributes(false),
                        },
                    )
                })
                .collect(),
            orientation: self.orientation(),
            graph_type: self.graph_type(),
        }
    }

    /// Full form including adjacency lists and display metadata
    pub fn to_full_json(&self) -> GraphFullJson {
        let full_node =
            |index: NodeIndex| self.node(index).cloned().unwrap_or_else(|| Node::new(index));
        GraphJson {
            nodes: self.nodes().map(|n| (n.index, n.clone())).collect(),
            edges: self
                .edges()
                .map(|e| {
                    (
                        e.key().to_string(),
                        EdgeJson {
                            first_node: full_node(e.first_node),
                            second_node: full_node(e.second_node),
                            attributes: e.attributes(true),
                        },
                    )
                })
                .collect(),
            orientation: self.orientation(),
            graph_type: self.graph_type(),
        }
    }

    /// Rebuild a graph from its full form, re-checking every invariant
    pub fn from_full_json(json: GraphFullJson) -> GraphResult<Graph> {
        let mut graph = Graph::with_type(json.orientation, json.graph_type);

        for (index, node) in json.nodes {
            if index != node.index {
                return Err(GraphError::validation(format!(
                    "node entry {} carries index {}",
                    index, node.index
                )));
            }
            GraphService::insert_node(&mut graph, node)?;
        }

        for (key, edge_json) in json.edges {
            let EdgeJson {
                first_node,
                second_node,
                attributes,
            } = edge_json;
            let edge_index = &attributes.edge_index;
            if key != edge_index.value
                || EdgeIndex::new(edge_index.from, edge_index.to).value != key
                || first_node.index != edge_index.from
                || second_node.index != edge_index.to
            {
                return Err(GraphError::validation(format!(
                    "edge entry {} is inconsistent with its endpoints",
                    key
                )));
            }
            GraphService::add_edge(&mut graph, Edge::from_attributes(attributes))?;
        }

        Ok(graph)
    }

    pub fn to_full_json_string(&self) -> GraphResult<String> {
        Ok(serde_json::to_string(&self.to_full_json())?)
    }

    pub fn from_full_json_str(s: &str) -> GraphResult<Graph> {
        let json: GraphFullJson = serde_json::from_str(s)?;
        Graph::from_full_json(json)
    }
}
