//! Matrix representations of a graph
//!
//! A [`GraphMatrix`] is a snapshot: it is derived from a graph (or parsed from
//! text) on demand and never mutated afterwards.
//!
//! Rows follow the ascending node index order of the graph and are labelled by
//! `vertex_indexes`; for a graph with indices `1..=n`, row `i` is node `i + 1`.

pub mod builder;
pub mod decode;
pub mod parse;

pub use builder::{
    build_matrix_from_graph, AdjacencyMatrixBuilder, IncidenceMatrixBuilder, MatrixBuilder,
};
pub use decode::build_graph_from_matrix;

use crate::error::{GraphError, GraphResult};
use crate::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatrixType {
    Adjacency,
    Incidence,
}

impl FromStr for MatrixType {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "adjacency" => Ok(MatrixType::Adjacency),
            "incidence" => Ok(MatrixType::Incidence),
            other => Err(GraphError::validation(format!("unknown matrix type '{}'", other))),
        }
    }
}

/// Decoding goes through [`GraphMatrix::adjacency`] / [`GraphMatrix::incidence`],
/// so a deserialized matrix has the same shape guarantees as a built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawGraphMatrix")]
pub struct GraphMatrix {
    #[serde(rename = "type")]
    matrix_type: MatrixType,
    matrix: Vec<Vec<f64>>,
    vertex_indexes: Vec<NodeIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    edge_indexes: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGraphMatrix {
    #[serde(rename = "type")]
    matrix_type: MatrixType,
    matrix: Vec<Vec<f64>>,
    vertex_indexes: Vec<NodeIndex>,
    #[serde(default)]
    edge_indexes: Option<Vec<String>>,
}

impl TryFrom<RawGraphMatrix> for GraphMatrix {
    type Error = GraphError;

    fn try_from(raw: RawGraphMatrix) -> GraphResult<Self> {
        match raw.matrix_type {
            MatrixType::Adjacency => GraphMatrix::adjacency(raw.matrix, raw.vertex_indexes),
            MatrixType::Incidence => {
                GraphMatrix::incidence(raw.matrix, raw.vertex_indexes, raw.edge_indexes)
            }
        }
    }
}

impl GraphMatrix {
    /// Square matrix with one row and column per vertex
    pub fn adjacency(matrix: Vec<Vec<f64>>, vertex_indexes: Vec<NodeIndex>) -> GraphResult<Self> {
        if vertex_indexes.len() != matrix.len() {
            return Err(GraphError::validation(format!(
                "{} vertex indexes for {} rows",
                vertex_indexes.len(),
                matrix.len()
            )));
        }
        if let Some(row) = matrix.iter().position(|r| r.len() != matrix.len()) {
            return Err(GraphError::validation(format!(
                "adjacency matrix must be square, row {} has {} columns",
                row + 1,
                matrix[row].len()
            )));
        }
        Ok(GraphMatrix {
            matrix_type: MatrixType::Adjacency,
            matrix,
            vertex_indexes,
            edge_indexes: None,
        })
    }

    /// One row per vertex, one column per edge
    pub fn incidence(
        matrix: Vec<Vec<f64>>,
        vertex_indexes: Vec<NodeIndex>,
        edge_indexes: Option<Vec<String>>,
    ) -> GraphResult<Self> {
        if vertex_indexes.len() != matrix.len() {
            return Err(GraphError::validation(format!(
                "{} vertex indexes for {} rows",
                vertex_indexes.len(),
                matrix.len()
            )));
        }
        let columns = matrix.first().map(Vec::len).unwrap_or(0);
        if let Some(row) = matrix.iter().position(|r| r.len() != columns) {
            return Err(GraphError::validation(format!(
                "row {} has {} columns, expected {}",
                row + 1,
                matrix[row].len(),
                columns
            )));
        }
        if let Some(edges) = &edge_indexes {
            if edges.len() != columns {
                return Err(GraphError::validation(format!(
                    "{} edge indexes for {} columns",
                    edges.len(),
                    columns
                )));
            }
        }
        Ok(GraphMatrix {
            matrix_type: MatrixType::Incidence,
            matrix,
            vertex_indexes,
            edge_indexes,
        })
    }

    pub fn matrix_type(&self) -> MatrixType {
        self.matrix_type
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn row_count(&self) -> usize {
        self.matrix.len()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.first().map(Vec::len).unwrap_or(0)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.matrix.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn vertex_indexes(&self) -> &[NodeIndex] {
        &self.vertex_indexes
    }

    pub fn edge_indexes(&self) -> Option<&[String]> {
        self.edge_indexes.as_deref()
    }
}

fn format_cell(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Export format: `", "` between cells, `";\n"` between rows, trailing `;`
impl fmt::Display for GraphMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .matrix
            .iter()
            .map(|row| row.iter().map(|v| format_cell(*v)).collect::<Vec<_>>().join(", "))
            .collect();
        if rows.is_empty() {
            return Ok(());
        }
        write!(f, "{};", rows.join(";\n"))
    }
}
