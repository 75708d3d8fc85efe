//! Vertex-set and edge-set representations of a graph
//!
//! Tokens keep the quoting they were produced or typed with: a labelled node is
//! `'label'`, an unlabelled one is its bare index, and an edge is
//! `<first>-<second>` built from the same rule. [`GraphSet::values`] gives the
//! quote-stripped values.

pub mod tokenize;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, NodeIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokenize::{compare_values, is_quoted, parse_index, split_edge_token, strip_quotes, tokenize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetType {
    Vertices,
    Edges,
}

impl FromStr for SetType {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "vertices" => Ok(SetType::Vertices),
            "edges" => Ok(SetType::Edges),
            other => Err(GraphError::validation(format!("unknown set type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSet {
    #[serde(rename = "type")]
    set_type: SetType,
    tokens: Vec<String>,
}

impl GraphSet {
    /// Derive a set from a graph; vertices in ascending index order, edges in
    /// edge-map order
    pub fn from_graph(graph: &Graph, set_type: SetType) -> GraphResult<GraphSet> {
        let tokens = match set_type {
            SetType::Vertices => graph.nodes().map(|n| n.token()).collect(),
            SetType::Edges => graph
                .edges()
                .map(|edge| {
                    let token = |index: NodeIndex| {
                        graph
                            .node(index)
                            .map(|n| n.token())
                            .ok_or_else(|| GraphError::node_not_found(index))
                    };
                    Ok(format!("{}-{}", token(edge.first_node)?, token(edge.second_node)?))
                })
                .collect::<GraphResult<Vec<String>>>()?,
        };
        Ok(GraphSet { set_type, tokens })
    }

    /// Parse set text. Vertex tokens are sorted numeric-first; edge tokens
    /// must have exactly two endpoints.
    ///
    /// Tokens are stored with their quotes so that `'12'` (a label) and `12`
    /// (an index) stay distinct; [`GraphSet::values`] gives the stripped form.
    pub fn parse(text: &str, set_type: SetType) -> GraphResult<GraphSet> {
        let raw = tokenize(text)?;
        let tokens = match set_type {
            SetType::Vertices => {
                let mut tokens = raw;
                tokens.sort_by(|a, b| compare_values(&strip_quotes(a), &strip_quotes(b)));
                tokens
            }
            SetType::Edges => raw
                .iter()
                .map(|token| {
                    let parts = split_edge_token(token);
                    if parts.len() != 2 || parts.iter().any(|p| strip_quotes(p).is_empty()) {
                        return Err(GraphError::validation(format!(
                            "edge token '{}' must have exactly two endpoints",
                            token
                        )));
                    }
                    Ok(parts.join("-"))
                })
                .collect::<GraphResult<Vec<String>>>()?,
        };
        Ok(GraphSet { set_type, tokens })
    }

    pub fn set_type(&self) -> SetType {
        self.set_type
    }

    /// Tokens as written, quotes kept
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Quote-stripped tokens
    pub fn values(&self) -> Vec<String> {
        self.tokens.iter().map(|t| strip_quotes(t)).collect()
    }

    /// Raw endpoint tokens of every edge token
    pub fn edge_endpoints(&self) -> GraphResult<Vec<(String, String)>> {
        if self.set_type != SetType::Edges {
            return Err(GraphError::validation("not an edge set"));
        }
        self.tokens
            .iter()
            .map(|token| match split_edge_token(token).as_slice() {
                [first, second] => Ok((first.to_string(), second.to_string())),
                _ => Err(GraphError::validation(format!(
                    "edge token '{}' must have exactly two endpoints",
                    token
                ))),
            })
            .collect()
    }
}

impl fmt::Display for GraphSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Build a graph from a vertex set and an edge set
///
/// Bare numeric vertex tokens become nodes with that index; any other token
/// becomes a labelled node with the lowest free index. Edge endpoints resolve
/// by label when quoted, by index when numeric.
pub fn build_graph_from_sets(
    vertices: &GraphSet,
    edges: &GraphSet,
    orientation: GraphOrientation,
) -> GraphResult<Graph> {
    if vertices.set_type() != SetType::Vertices || edges.set_type() != SetType::Edges {
        return Err(GraphError::validation("expected a vertex set and an edge set"));
    }

    let mut graph = Graph::new(orientation);
    let (numeric, labelled): (Vec<&String>, Vec<&String>) = vertices
        .tokens()
        .iter()
        .partition(|t| !is_quoted(t) && parse_index(t).is_some());

    for token in numeric {
        if let Some(index) = parse_index(token) {
            GraphService::add_node(&mut graph, Some(NodeIndex(index)), None)?;
        }
    }
    for token in labelled {
        let label = strip_quotes(token);
        if graph.node_by_label(&label).is_some() {
            return Err(GraphError::duplicate_node(format!("'{}'", label)));
        }
        GraphService::add_node_with_label(&mut graph, label)?;
    }

    let edge_orientation = orientation.default_edge_orientation();
    for (first, second) in edges.edge_endpoints()? {
        let first = resolve_endpoint(&graph, &first)?;
        let second = resolve_endpoint(&graph, &second)?;
        if edge_orientation == EdgeOrientation::NonOriented
            && GraphService::is_edge_exists(&graph, second, first)
        {
            return Err(GraphError::duplicate_edge(format!("{}-{}", first, second)));
        }
        GraphService::add_edge(&mut graph, Edge::new(first, second, edge_orientation))?;
    }

    debug!(
        "Built graph with {} nodes and {} edges from sets",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn resolve_endpoint(graph: &Graph, token: &str) -> GraphResult<NodeIndex> {
    let value = strip_quotes(token);
    if !is_quoted(token) {
        if let Some(index) = parse_index(&value) {
            return if graph.contains_node(NodeIndex(index)) {
                Ok(NodeIndex(index))
            } else {
                Err(GraphError::node_not_found(index))
            };
        }
    }
    graph
        .node_by_label(&value)
        .map(|n| n.index)
        .ok_or_else(|| GraphError::node_not_found(format!("'{}'", value)))
}
