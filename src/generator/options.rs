//! Generation options as handed over by the settings form

use crate::error::{GraphError, GraphResult};
use crate::graph::{GraphOrientation, GraphType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub graph_orientation: GraphOrientation,
    pub graph_type: GraphType,
    /// Maximum children per node for tree graphs
    pub n_arity: u32,
    pub fixed_number_of_nodes: bool,
    pub fixed_nodes_number: u32,
    /// Inclusive `[min, max]`, in either order
    pub dynamic_nodes_number: [u32; 2],
    pub allow_loops: bool,
    pub allow_two_direction_edges: bool,
    pub edges_probability: f64,
    pub edge_weight_specify: bool,
    /// Inclusive `[min, max]`, in either order
    pub edge_weight_range: [i64; 2],
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            graph_orientation: GraphOrientation::NonOriented,
            graph_type: GraphType::Default,
            n_arity: 2,
            fixed_number_of_nodes: true,
            fixed_nodes_number: 6,
            dynamic_nodes_number: [3, 10],
            allow_loops: false,
            allow_two_direction_edges: false,
            edges_probability: 0.5,
            edge_weight_specify: false,
            edge_weight_range: [1, 10],
        }
    }
}

impl GenerationOptions {
    pub fn from_json_str(s: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn node_range(&self) -> (u32, u32) {
        let [a, b] = self.dynamic_nodes_number;
        (a.min(b), a.max(b))
    }

    pub fn weight_range(&self) -> (i64, i64) {
        let [a, b] = self.edge_weight_range;
        (a.min(b), a.max(b))
    }

    pub fn validate(&self, max_nodes: usize) -> GraphResult<()> {
        let max_nodes = max_nodes as u64;
        if self.fixed_number_of_nodes {
            let n = self.fixed_nodes_number as u64;
            if n < 1 || n > max_nodes {
                return Err(GraphError::validation(format!(
                    "fixedNodesNumber must be within 1..={}, got {}",
                    max_nodes, n
                )));
            }
        } else {
            let (min, max) = self.node_range();
            if min < 1 || max as u64 > max_nodes {
                return Err(GraphError::validation(format!(
                    "dynamicNodesNumber must be within 1..={}, got [{}, {}]",
                    max_nodes, min, max
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.edges_probability) {
            return Err(GraphError::validation(format!(
                "edgesProbability must be within [0, 1], got {}",
                self.edges_probability
            )));
        }
        if self.graph_type == GraphType::Tree && self.n_arity < 1 {
            return Err(GraphError::validation("nArity must be at least 1"));
        }
        Ok(())
    }
}
