//! Matrix -> graph builder
//!
//! Loops carry no direction information in either matrix form. They are
//! materialized last and take the orientation of the other edges: ORIENTED
//! when every non-loop edge is oriented, NON_ORIENTED otherwise.

use super::{GraphMatrix, MatrixType};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, NodeIndex};
use std::collections::HashSet;
use tracing::debug;

/// Reconstruct a graph from an adjacency or incidence matrix
pub fn build_graph_from_matrix(matrix: &GraphMatrix) -> GraphResult<Graph> {
    let mut graph = Graph::new(GraphOrientation::NonOriented);
    for index in matrix.vertex_indexes() {
        GraphService::add_node(&mut graph, Some(*index), None)?;
    }

    let loops = match matrix.matrix_type() {
        MatrixType::Adjacency => decode_adjacency(matrix, &mut graph)?,
        MatrixType::Incidence => decode_incidence(matrix, &mut graph)?,
    };

    let all_oriented =
        graph.edge_count() > 0 && graph.orientation() == GraphOrientation::Oriented;
    let loop_orientation = if all_oriented {
        EdgeOrientation::Oriented
    } else {
        EdgeOrientation::NonOriented
    };
    for (node, weight) in loops {
        let edge = Edge::new(node, node, loop_orientation).with_weight(weight);
        GraphService::add_edge(&mut graph, edge)?;
    }

    debug!(
        "Built graph with {} nodes and {} edges from {:?} matrix",
        graph.node_count(),
        graph.edge_count(),
        matrix.matrix_type()
    );
    Ok(graph)
}

/// Adds every non-loop edge and returns the loops as `(node, weight)`
fn decode_adjacency(matrix: &GraphMatrix, graph: &mut Graph) -> GraphResult<Vec<(NodeIndex, f64)>> {
    let rows = matrix.rows();
    let vertices = matrix.vertex_indexes();
    let mut emitted: HashSet<(usize, usize)> = HashSet::new();
    let mut loops = Vec::new();

    for i in 0..rows.len() {
        for j in 0..rows.len() {
            let weight = rows[i][j];
            if weight <= 0.0 || emitted.contains(&(i.min(j), i.max(j))) {
                continue;
            }
            emitted.insert((i.min(j), i.max(j)));

            if i == j {
                loops.push((vertices[i], weight));
                continue;
            }
            let orientation = if rows[j][i] == 0.0 {
                EdgeOrientation::Oriented
            } else {
                EdgeOrientation::NonOriented
            };
            GraphService::add_edge(
                graph,
                Edge::new(vertices[i], vertices[j], orientation).with_weight(weight),
            )?;
        }
    }
    Ok(loops)
}

fn decode_incidence(matrix: &GraphMatrix, graph: &mut Graph) -> GraphResult<Vec<(NodeIndex, f64)>> {
    let rows = matrix.rows();
    let vertices = matrix.vertex_indexes();
    let mut loops = Vec::new();

    for column in 0..matrix.column_count() {
        let entries: Vec<(usize, f64)> = rows
            .iter()
            .enumerate()
            .filter_map(|(row, values)| {
                let value = values[column];
                (value != 0.0).then_some((row, value))
            })
            .collect();

        match entries.as_slice() {
            [(row, value)] => {
                let magnitude = value.abs();
                if magnitude.fract() != 0.0 || magnitude % 2.0 != 0.0 {
                    return Err(GraphError::validation(format!(
                        "column {} has a single entry {}, a loop needs an even magnitude",
                        column + 1,
                        value
                    )));
                }
                loops.push((vertices[*row], magnitude / 2.0));
            }
            [(row_a, value_a), (row_b, value_b)] => {
                if value_a.abs() != value_b.abs() {
                    return Err(GraphError::validation(format!(
                        "column {} has unequal magnitudes {} and {}",
                        column + 1,
                        value_a,
                        value_b
                    )));
                }
                let weight = value_a.abs();
                let edge = if value_a.signum() == value_b.signum() {
                    Edge::new(vertices[*row_a], vertices[*row_b], EdgeOrientation::NonOriented)
                } else if *value_a > 0.0 {
                    Edge::new(vertices[*row_a], vertices[*row_b], EdgeOrientation::Oriented)
                } else {
                    Edge::new(vertices[*row_b], vertices[*row_a], EdgeOrientation::Oriented)
                };
                GraphService::add_edge(graph, edge.with_weight(weight))?;
            }
            other => {
                return Err(GraphError::validation(format!(
                    "column {} has {} nonzero entries, expected 1 or 2",
                    column + 1,
                    other.len()
                )))
            }
        }
    }
    Ok(loops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::build_matrix_from_graph;

    fn indexes(n: u64) -> Vec<NodeIndex> {
        (1..=n).map(NodeIndex).collect()
    }

    #[test]
    fn test_adjacency_decode() {
        let matrix = GraphMatrix::adjacency(
            vec![
                vec![0.0, 2.0, 0.0],
                vec![2.0, 0.0, 5.0],
                vec![0.0, 0.0, 0.0],
            ],
            indexes(3),
        )
        .unwrap();
        let graph = build_graph_from_matrix(&matrix).unwrap();
        assert_eq!(graph.edge_count(), 2);
        let undirected = graph.edge("1-2").unwrap();
        assert_eq!(undirected.orientation, EdgeOrientation::NonOriented);
        assert_eq!(undirected.weight, 2.0);
        let directed = graph.edge("2-3").unwrap();
        assert_eq!(directed.orientation, EdgeOrientation::Oriented);
        assert_eq!(directed.weight, 5.0);
        assert_eq!(graph.orientation(), GraphOrientation::Mixed);
        assert!(!graph.contains_edge("2-1"));
    }

    #[test]
    fn test_adjacency_lower_triangle_edge() {
        let matrix =
            GraphMatrix::adjacency(vec![vec![0.0, 0.0], vec![3.0, 0.0]], indexes(2)).unwrap();
        let graph = build_graph_from_matrix(&matrix).unwrap();
        let edge = graph.edge("2-1").unwrap();
        assert!(edge.is_oriented());
        assert_eq!(graph.orientation(), GraphOrientation::Oriented);
    }

    #[test]
    fn test_loop_takes_oriented_graph_orientation() {
        let matrix = GraphMatrix::adjacency(
            vec![vec![1.0, 1.0], vec![0.0, 0.0]],
            indexes(2),
        )
        .unwrap();
        let graph = build_graph_from_matrix(&matrix).unwrap();
        assert!(graph.edge("1-1").unwrap().is_oriented());
        assert_eq!(graph.orientation(), GraphOrientation::Oriented);
    }

    #[test]
    fn test_incidence_decode() {
        let matrix = GraphMatrix::incidence(
            vec![
                vec![-1.0, 1.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 2.0],
            ],
            indexes(3),
            None,
        )
        .unwrap();
        let graph = build_graph_from_matrix(&matrix).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.edge("2-1").unwrap().is_oriented());
        assert!(!graph.edge("1-3").unwrap().is_oriented());
        let loop_edge = graph.edge("3-3").unwrap();
        assert_eq!(loop_edge.weight, 1.0);
        assert!(!loop_edge.is_oriented());
    }

    #[test]
    fn test_incidence_malformed_column() {
        let matrix = GraphMatrix::incidence(
            vec![vec![1.0], vec![1.0], vec![-1.0]],
            indexes(3),
            None,
        )
        .unwrap();
        assert!(matches!(
            build_graph_from_matrix(&matrix),
            Err(GraphError::ValidationError(_))
        ));

        let empty_column =
            GraphMatrix::incidence(vec![vec![0.0], vec![0.0]], indexes(2), None).unwrap();
        assert!(matches!(
            build_graph_from_matrix(&empty_column),
            Err(GraphError::ValidationError(_))
        ));
    }

    #[test]
    fn test_incidence_single_entry_needs_even_magnitude() {
        for text in ["1; 0", "-3; 0", "0; 5"] {
            let matrix = GraphMatrix::parse(text, MatrixType::Incidence).unwrap();
            assert!(
                matches!(build_graph_from_matrix(&matrix), Err(GraphError::ValidationError(_))),
                "{} accepted",
                text
            );
        }

        let matrix = GraphMatrix::parse("0; -4", MatrixType::Incidence).unwrap();
        let graph = build_graph_from_matrix(&matrix).unwrap();
        assert_eq!(graph.edge("2-2").unwrap().weight, 2.0);
    }

    #[test]
    fn test_incidence_round_trip() {
        let mut graph = Graph::new(GraphOrientation::Oriented);
        for _ in 0..4 {
            GraphService::add_node(&mut graph, None, None).unwrap();
        }
        for (a, b, w) in [(1, 2, 2.0), (3, 1, 4.0), (4, 4, 1.0), (2, 4, 7.0)] {
            let edge = Edge::new(a, b, EdgeOrientation::Oriented).with_weight(w);
            GraphService::add_edge(&mut graph, edge).unwrap();
        }
        let matrix = build_matrix_from_graph(&graph, MatrixType::Incidence).unwrap();
        let rebuilt = build_graph_from_matrix(&matrix).unwrap();

        assert_eq!(rebuilt.node_count(), 4);
        assert_eq!(rebuilt.edge_count(), 4);
        for edge in graph.edges() {
            let other = rebuilt.edge(edge.key()).unwrap();
            assert_eq!(other.weight, edge.weight);
            assert_eq!(other.orientation, edge.orientation);
        }
    }
}
