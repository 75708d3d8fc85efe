//! Graph -> matrix builders
//!
//! Incidence encoding, per column (one edge of weight `w`):
//! - oriented edge: `+w` on the tail row, `-w` on the head row
//! - non-oriented edge: `+w` on both rows
//! - loop: a single `+2w` cell, so loop weights must be integers

use super::{GraphMatrix, MatrixType};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Builds one matrix representation of a graph
pub trait MatrixBuilder {
    fn matrix_type(&self) -> MatrixType;

    fn build(&self, graph: &Graph) -> GraphResult<GraphMatrix>;
}

pub struct AdjacencyMatrixBuilder;

pub struct IncidenceMatrixBuilder;

/// Row position of every node, in ascending index order
fn row_positions(graph: &Graph) -> (Vec<NodeIndex>, HashMap<NodeIndex, usize>) {
    let indexes = graph.node_indexes();
    let positions = indexes.iter().enumerate().map(|(row, index)| (*index, row)).collect();
    (indexes, positions)
}

fn position_of(positions: &HashMap<NodeIndex, usize>, index: NodeIndex) -> GraphResult<usize> {
    positions
        .get(&index)
        .copied()
        .ok_or_else(|| GraphError::node_not_found(index))
}

impl MatrixBuilder for AdjacencyMatrixBuilder {
    fn matrix_type(&self) -> MatrixType {
        MatrixType::Adjacency
    }

    fn build(&self, graph: &Graph) -> GraphResult<GraphMatrix> {
        let (indexes, positions) = row_positions(graph);
        let size = indexes.len();
        let mut matrix = vec![vec![0.0; size]; size];

        for edge in graph.edges() {
            let first = position_of(&positions, edge.first_node)?;
            let second = position_of(&positions, edge.second_node)?;
            matrix[first][second] = edge.weight;
            if !edge.is_oriented() {
                matrix[second][first] = edge.weight;
            }
        }

        debug!("Built {}x{} adjacency matrix", size, size);
        GraphMatrix::adjacency(matrix, indexes)
    }
}

impl MatrixBuilder for IncidenceMatrixBuilder {
    fn matrix_type(&self) -> MatrixType {
        MatrixType::Incidence
    }

    fn build(&self, graph: &Graph) -> GraphResult<GraphMatrix> {
        let (indexes, positions) = row_positions(graph);
        let columns = graph.edge_count();
        let mut matrix = vec![vec![0.0; columns]; indexes.len()];
        let mut edge_indexes = Vec::with_capacity(columns);

        for (column, edge) in graph.edges().enumerate() {
            let first = position_of(&positions, edge.first_node)?;
            let second = position_of(&positions, edge.second_node)?;
            if edge.is_loop() {
                if edge.weight.fract() != 0.0 {
                    return Err(GraphError::validation(format!(
                        "loop {} has weight {}, incidence loops need an integer weight",
                        edge.key(),
                        edge.weight
                    )));
                }
                matrix[first][column] = 2.0 * edge.weight;
            } else if edge.is_oriented() {
                matrix[first][column] = edge.weight;
                matrix[second][column] = -edge.weight;
            } else {
                matrix[first][column] = edge.weight;
                matrix[second][column] = edge.weight;
            }
            edge_indexes.push(edge.key().to_string());
        }

        debug!("Built {}x{} incidence matrix", indexes.len(), columns);
        GraphMatrix::incidence(matrix, indexes, Some(edge_indexes))
    }
}

/// Build the requested matrix representation of a graph
pub fn build_matrix_from_graph(graph: &Graph, matrix_type: MatrixType) -> GraphResult<GraphMatrix> {
    match matrix_type {
        MatrixType::Adjacency => AdjacencyMatrixBuilder.build(graph),
        MatrixType::Incidence => IncidenceMatrixBuilder.build(graph),
    }
}
