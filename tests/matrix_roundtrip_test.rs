use graphedit::config::GeneratorConfig;
use graphedit::generator::{GenerationOptions, GraphGenerator};
use graphedit::graph::{Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, NodeIndex};
use graphedit::matrix::{build_graph_from_matrix, build_matrix_from_graph, GraphMatrix, MatrixType};
use graphedit::GraphError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

/// Edges keyed by endpoint pair; non-oriented pairs are normalized
fn edge_summary(graph: &Graph) -> BTreeMap<(u64, u64), (EdgeOrientation, f64)> {
    graph
        .edges()
        .map(|e| {
            let (a, b) = (e.first_node.as_u64(), e.second_node.as_u64());
            let pair = if e.is_oriented() { (a, b) } else { (a.min(b), a.max(b)) };
            (pair, (e.orientation, e.weight))
        })
        .collect()
}

fn generated(orientation: GraphOrientation, seed: u64) -> Graph {
    let options = GenerationOptions {
        graph_orientation: orientation,
        fixed_nodes_number: 20,
        edges_probability: 1.0,
        allow_loops: true,
        edge_weight_specify: true,
        edge_weight_range: [1, 9],
        ..GenerationOptions::default()
    };
    GraphGenerator::new(GeneratorConfig { max_nodes: 100 })
        .generate_with_rng(&options, &mut StdRng::seed_from_u64(seed))
        .unwrap()
}

#[test]
fn test_adjacency_mirror_invariant() {
    let mut graph = Graph::new(GraphOrientation::NonOriented);
    for _ in 0..4 {
        GraphService::add_node(&mut graph, None, None).unwrap();
    }
    let undirected = Edge::new(3, 1, EdgeOrientation::NonOriented).with_weight(7.0);
    GraphService::add_edge(&mut graph, undirected).unwrap();
    let directed = Edge::new(2, 4, EdgeOrientation::Oriented).with_weight(2.0);
    GraphService::add_edge(&mut graph, directed).unwrap();

    let matrix = build_matrix_from_graph(&graph, MatrixType::Adjacency).unwrap();
    assert_eq!(matrix.get(2, 0), Some(7.0));
    assert_eq!(matrix.get(0, 2), Some(7.0));
    assert_eq!(matrix.get(1, 3), Some(2.0));
    assert_eq!(matrix.get(3, 1), Some(0.0));
}

#[test]
fn test_adjacency_round_trip_of_generated_graphs() {
    for orientation in [GraphOrientation::Oriented, GraphOrientation::NonOriented] {
        for seed in 0..5 {
            let graph = generated(orientation, seed);
            let matrix = build_matrix_from_graph(&graph, MatrixType::Adjacency).unwrap();
            let rebuilt = build_graph_from_matrix(&matrix).unwrap();

            assert!(graph.edge_count() > 0);
            assert_eq!(rebuilt.node_count(), graph.node_count());
            assert_eq!(rebuilt.edge_count(), graph.edge_count());
            assert_eq!(edge_summary(&rebuilt), edge_summary(&graph));
        }
    }
}

#[test]
fn test_incidence_round_trip_of_generated_graphs() {
    for orientation in [GraphOrientation::Oriented, GraphOrientation::NonOriented] {
        for seed in 0..5 {
            let graph = generated(orientation, seed);
            let matrix = build_matrix_from_graph(&graph, MatrixType::Incidence).unwrap();
            assert_eq!(matrix.column_count(), graph.edge_count());
            let rebuilt = build_graph_from_matrix(&matrix).unwrap();

            assert_eq!(rebuilt.node_count(), graph.node_count());
            assert_eq!(edge_summary(&rebuilt), edge_summary(&graph));
        }
    }
}

#[test]
fn test_round_trip_through_text() {
    let graph = generated(GraphOrientation::Oriented, 42);
    let text = build_matrix_from_graph(&graph, MatrixType::Incidence).unwrap().to_string();
    let parsed = GraphMatrix::parse(&text, MatrixType::Incidence).unwrap();
    let rebuilt = build_graph_from_matrix(&parsed).unwrap();
    assert_eq!(edge_summary(&rebuilt), edge_summary(&graph));
}

#[test]
fn test_matrix_rows_follow_ascending_indexes() {
    let mut graph = Graph::new(GraphOrientation::Oriented);
    for index in [5u64, 2, 9] {
        GraphService::add_node(&mut graph, Some(NodeIndex(index)), None).unwrap();
    }
    GraphService::add_edge(&mut graph, Edge::new(9, 2, EdgeOrientation::Oriented)).unwrap();

    let matrix = build_matrix_from_graph(&graph, MatrixType::Adjacency).unwrap();
    assert_eq!(matrix.vertex_indexes(), &[NodeIndex(2), NodeIndex(5), NodeIndex(9)]);
    assert_eq!(matrix.get(2, 0), Some(1.0));

    let rebuilt = build_graph_from_matrix(&matrix).unwrap();
    assert!(rebuilt.contains_edge("9-2"));
}

#[test]
fn test_malformed_incidence_column() {
    let matrix = GraphMatrix::parse("1 0; 1 1; 1 0", MatrixType::Incidence).unwrap();
    let err = build_graph_from_matrix(&matrix).unwrap_err();
    assert!(matches!(err, GraphError::ValidationError(_)));
}
