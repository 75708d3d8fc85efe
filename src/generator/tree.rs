//! Random n-ary tree generation
//!
//! Node 1 is the root. Every following node is attached to a uniformly chosen
//! earlier node that still has fewer than `nArity` children, so the result is
//! connected, acyclic and honors the branching factor.

use super::options::GenerationOptions;
use crate::error::GraphResult;
use crate::graph::{
    Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, GraphType, NodeIndex,
};
use rand::Rng;

pub(super) fn generate_tree<R: Rng + ?Sized>(
    options: &GenerationOptions,
    nodes: usize,
    rng: &mut R,
) -> GraphResult<Graph> {
    let orientation = options.graph_orientation;
    let mut graph = Graph::with_type(orientation, GraphType::Tree);
    for index in 1..=nodes as u64 {
        GraphService::add_node(&mut graph, Some(NodeIndex(index)), None)?;
    }

    let arity = options.n_arity.max(1) as usize;
    let weights = super::generate_weights(options, nodes.saturating_sub(1), rng);
    let mut children = vec![0usize; nodes];
    let mut open: Vec<usize> = vec![0];

    for child in 1..nodes {
        // the previous node never has children yet, so `open` is never empty here
        let slot = rng.gen_range(0..open.len());
        let parent = open[slot];
        children[parent] += 1;
        if children[parent] >= arity {
            open.swap_remove(slot);
        }
        open.push(child);

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
            Edge::new(parent as u64 + 1, child as u64 + 1, edge_orientation)
                .with_weight(weights[child - 1]),
        )?;
    }

    super::settle_empty_orientation(&mut graph, orientation);
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet, VecDeque};

    fn tree(nodes: usize, arity: u32, seed: u64) -> Graph {
        let options = GenerationOptions {
            graph_type: GraphType::Tree,
            graph_orientation: GraphOrientation::Oriented,
            n_arity: arity,
            ..GenerationOptions::default()
        };
        generate_tree(&options, nodes, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_tree_is_connected_and_acyclic() {
        for seed in 0..10 {
            let graph = tree(15, 3, seed);
            assert_eq!(graph.graph_type(), GraphType::Tree);
            assert_eq!(graph.edge_count(), 14);

            let mut seen = HashSet::from([NodeIndex(1)]);
            let mut queue = VecDeque::from([NodeIndex(1)]);
            while let Some(node) = queue.pop_front() {
                for next in GraphService::get_connected_nodes(&graph, node).unwrap() {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            assert_eq!(seen.len(), 15);
        }
    }

    #[test]
    fn test_tree_honors_arity() {
        for seed in 0..10 {
            let graph = tree(20, 2, seed);
            let mut children: HashMap<NodeIndex, usize> = HashMap::new();
            let mut parents: HashMap<NodeIndex, usize> = HashMap::new();
            for edge in graph.edges() {
                assert!(edge.first_node < edge.second_node);
                *children.entry(edge.first_node).or_default() += 1;
                *parents.entry(edge.second_node).or_default() += 1;
            }
            assert!(children.values().all(|&c| c <= 2));
            assert!(parents.values().all(|&p| p == 1));
            assert!(!parents.contains_key(&NodeIndex(1)));
        }
    }

    #[test]
    fn test_unary_tree_is_a_path() {
        let graph = tree(5, 1, 3);
        for i in 1..5u64 {
            assert!(graph.contains_edge(&format!("{}-{}", i, i + 1)));
        }
    }

    #[test]
    fn test_single_node_tree() {
        let graph = tree(1, 2, 0);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
