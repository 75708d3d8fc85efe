//! Random graph generation
//!
//! Edge counts are damped for larger graphs so dense settings stay readable:
//!
//! ```text
//! x         = (n - 1) / (C - 1)
//! quadratic = a + (b - a) * (1 - (1 - x)^k)        a = 2, b = 6, k = 2
//! edges     = floor(maxEdges * edgesProbability * exp(-quadratic))
//! ```
//!
//! where `C` is the configured maximum node count.

pub mod options;
mod tree;

pub use options::GenerationOptions;

use crate::config::GeneratorConfig;
use crate::error::GraphResult;
use crate::graph::{
    Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, GraphType, NodeIndex,
};
use rand::prelude::*;
use tracing::{debug, info};

pub const DAMPING_A: f64 = 2.0;
pub const DAMPING_B: f64 = 6.0;
pub const DAMPING_K: i32 = 2;

/// Pair count of a simple graph: `n(n-1)/2` non-oriented, `n(n-1)` otherwise
pub fn max_edges(nodes: usize, orientation: GraphOrientation) -> usize {
    let ordered = nodes * nodes.saturating_sub(1);
    match orientation {
        GraphOrientation::NonOriented => ordered / 2,
        GraphOrientation::Oriented | GraphOrientation::Mixed => ordered,
    }
}

/// Damped number of edges to generate
pub fn edges_count(
    nodes: usize,
    orientation: GraphOrientation,
    edges_probability: f64,
    max_nodes: usize,
) -> usize {
    if nodes == 0 {
        return 0;
    }
    let normalized_x = (nodes as f64 - 1.0) / (max_nodes as f64 - 1.0);
    let quadratic =
        DAMPING_A + (DAMPING_B - DAMPING_A) * (1.0 - (1.0 - normalized_x).powi(DAMPING_K));
    let count = max_edges(nodes, orientation) as f64 * edges_probability * (-quadratic).exp();
    count.floor().max(0.0) as usize
}

pub struct GraphGenerator {
    config: GeneratorConfig,
}

impl GraphGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, options: &GenerationOptions) -> GraphResult<Graph> {
        self.generate_with_rng(options, &mut thread_rng())
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> GraphResult<Graph> {
        options.validate(self.config.max_nodes)?;

        let nodes = if options.fixed_number_of_nodes {
            options.fixed_nodes_number as usize
        } else {
            let (min, max) = options.node_range();
            rng.gen_range(min..=max) as usize
        };

        let graph = match options.graph_type {
            GraphType::Default => self.generate_default(options, nodes, rng)?,
            GraphType::Tree => tree::generate_tree(options, nodes, rng)?,
        };

        info!(
            "Generated {:?} graph with {} nodes and {} edges",
            options.graph_type,
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn generate_default<R: Rng + ?Sized>(
        &self,
        options: &GenerationOptions,
        nodes: usize,
        rng: &mut R,
    ) -> GraphResult<Graph> {
        let orientation = options.graph_orientation;
        let mut graph = Graph::new(orientation);
        for index in 1..=nodes as u64 {
            GraphService::add_node(&mut graph, Some(NodeIndex(index)), None)?;
        }

        let edges_number = edges_count(
            nodes,
            orientation,
            options.edges_probability,
            self.config.max_nodes,
        );
        let weights = generate_weights(options, edges_number, rng);

        let mut pairs = candidate_pairs(nodes, options.allow_loops);
        pairs.shuffle(rng);
        debug!(
            "Placing {} edges among {} candidate pairs",
            edges_number,
            pairs.len()
        );

        let mut placed = 0;
        while placed < edges_number {
            let Some((first, second)) = pairs.pop() else {
                break;
            };
            if !pair_allowed(&graph, options, first, second) {
                continue;
            }
            let edge_orientation = match orientation {
                GraphOrientation::Oriented => EdgeOrientation::Oriented,
                GraphOrientation::NonOriented => EdgeOrientation::NonOriented,
                GraphOrientation::Mixed => {
                    if rng.gen_bool(0.5) {
                        EdgeOrientation::Oriented
                    } else {
                        EdgeOrientation::NonOriented
                    }
                }
            };
            GraphService::add_edge(
                &mut graph,
                Edge::new(first, second, edge_orientation).with_weight(weights[placed]),
            )?;
            placed += 1;
        }

        settle_empty_orientation(&mut graph, orientation);
        Ok(graph)
    }
}

/// An edgeless graph keeps the requested orientation, except MIXED, which
/// needs both edge kinds and falls back to NON_ORIENTED
pub(crate) fn settle_empty_orientation(graph: &mut Graph, requested: GraphOrientation) {
    if graph.edge_count() > 0 {
        return;
    }
    let orientation = match requested {
        GraphOrientation::Mixed => GraphOrientation::NonOriented,
        other => other,
    };
    GraphService::set_orientation(graph, orientation);
}

impl Default for GraphGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Independent uniform weights from the configured range, or all 1
pub(crate) fn generate_weights<R: Rng + ?Sized>(
    options: &GenerationOptions,
    count: usize,
    rng: &mut R,
) -> Vec<f64> {
    if !options.edge_weight_specify {
        return vec![1.0; count];
    }
    let (min, max) = options.weight_range();
    (0..count).map(|_| rng.gen_range(min..=max) as f64).collect()
}

/// Every ordered pair of node indices, self-pairs only when loops are allowed
fn candidate_pairs(nodes: usize, allow_loops: bool) -> Vec<(NodeIndex, NodeIndex)> {
    let nodes = nodes as u64;
    let mut pairs = Vec::new();
    for first in 1..=nodes {
        for second in 1..=nodes {
            if first != second || allow_loops {
                pairs.push((NodeIndex(first), NodeIndex(second)));
            }
        }
    }
    pairs
}

/// Skip existing edges, and reverse pairs unless two-direction oriented edges are allowed
fn pair_allowed(
    graph: &Graph,
    options: &GenerationOptions,
    first: NodeIndex,
    second: NodeIndex,
) -> bool {
    if GraphService::is_edge_exists(graph, first, second) {
        return false;
    }
    let reverse_allowed = options.graph_orientation == GraphOrientation::Oriented
        && options.allow_two_direction_edges;
    reverse_allowed || !GraphService::is_edge_exists(graph, second, first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_max_edges() {
        assert_eq!(max_edges(5, GraphOrientation::NonOriented), 10);
        assert_eq!(max_edges(5, GraphOrientation::Oriented), 20);
        assert_eq!(max_edges(0, GraphOrientation::Oriented), 0);
        assert_eq!(max_edges(1, GraphOrientation::NonOriented), 0);
    }

    #[test]
    fn test_edges_count_damping() {
        // n = 1 -> x = 0, quadratic = a
        assert_eq!(edges_count(1, GraphOrientation::Oriented, 1.0, 20), 0);
        // n = C -> x = 1, quadratic = b
        let expected = (190.0 * 1.0 * (-6.0f64).exp()).floor() as usize;
        assert_eq!(edges_count(20, GraphOrientation::NonOriented, 1.0, 20), expected);
        // n = 11, C = 21 -> x = 0.5, quadratic = 2 + 4 * 0.75 = 5
        let expected = (110.0 * 0.5 * (-5.0f64).exp()).floor() as usize;
        assert_eq!(edges_count(11, GraphOrientation::Oriented, 0.5, 21), expected);
        assert_eq!(edges_count(11, GraphOrientation::Oriented, 0.0, 21), 0);
    }

    #[test]
    fn test_fixed_node_count() {
        let options = GenerationOptions {
            fixed_nodes_number: 9,
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::default().generate_with_rng(&options, &mut rng()).unwrap();
        assert_eq!(graph.node_count(), 9);
        assert_eq!(
            graph.node_indexes(),
            (1..=9).map(NodeIndex).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_edgeless_mixed_request_is_non_oriented() {
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Mixed,
            fixed_nodes_number: 6,
            edges_probability: 0.0,
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::default().generate_with_rng(&options, &mut rng()).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.orientation(), GraphOrientation::NonOriented);

        let single_node_tree = GenerationOptions {
            graph_type: GraphType::Tree,
            fixed_nodes_number: 1,
            ..options
        };
        let tree = GraphGenerator::default()
            .generate_with_rng(&single_node_tree, &mut rng())
            .unwrap();
        assert_eq!(tree.orientation(), GraphOrientation::NonOriented);
    }

    #[test]
    fn test_dynamic_node_count_in_range() {
        let options = GenerationOptions {
            fixed_number_of_nodes: false,
            dynamic_nodes_number: [7, 3],
            ..GenerationOptions::default()
        };
        let generator = GraphGenerator::default();
        let mut rng = rng();
        for _ in 0..20 {
            let graph = generator.generate_with_rng(&options, &mut rng).unwrap();
            assert!((3..=7).contains(&graph.node_count()));
        }
    }

    #[test]
    fn test_edge_count_matches_damped_count() {
        let config = GeneratorConfig { max_nodes: 100 };
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Oriented,
            fixed_nodes_number: 40,
            edges_probability: 1.0,
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::new(config.clone())
            .generate_with_rng(&options, &mut rng())
            .unwrap();
        let expected = edges_count(40, GraphOrientation::Oriented, 1.0, config.max_nodes);
        assert!(expected > 0);
        assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn test_weights_within_range() {
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Oriented,
            fixed_nodes_number: 20,
            edges_probability: 1.0,
            edge_weight_specify: true,
            edge_weight_range: [5, 3],
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::new(GeneratorConfig { max_nodes: 100 })
            .generate_with_rng(&options, &mut rng())
            .unwrap();
        assert!(graph.edge_count() > 0);
        for edge in graph.edges() {
            assert!((3.0..=5.0).contains(&edge.weight));
            assert_eq!(edge.weight.fract(), 0.0);
        }
    }

    #[test]
    fn test_no_reverse_pairs_without_two_direction_edges() {
        let pairs_seen = |graph: &Graph| {
            graph.edges().all(|e| {
                !GraphService::is_edge_exists(graph, e.second_node, e.first_node) || e.is_loop()
            })
        };
        let config = GeneratorConfig { max_nodes: 100 };
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Oriented,
            fixed_nodes_number: 30,
            edges_probability: 1.0,
            allow_loops: true,
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::new(config)
            .generate_with_rng(&options, &mut rng())
            .unwrap();
        assert!(pairs_seen(&graph));
        assert!(graph.edge_count() <= max_edges(30, GraphOrientation::Oriented));
    }

    #[test]
    fn test_mixed_generation_uses_each_pair_once() {
        let config = GeneratorConfig { max_nodes: 100 };
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Mixed,
            fixed_nodes_number: 30,
            edges_probability: 1.0,
            ..GenerationOptions::default()
        };
        let graph = GraphGenerator::new(config)
            .generate_with_rng(&options, &mut rng())
            .unwrap();
        for edge in graph.edges() {
            assert!(!graph.contains_edge(edge.edge_index().reversed().as_str()));
        }
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = GenerationOptions {
            fixed_nodes_number: 0,
            ..GenerationOptions::default()
        };
        assert!(GraphGenerator::default().generate(&options).is_err());
    }
}
