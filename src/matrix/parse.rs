//! Matrix text format
//!
//! Rows are terminated by `;` and/or newlines; cells within a row are
//! separated by spaces or commas. Cells are integers, signed for incidence
//! matrices.

use super::{GraphMatrix, MatrixType};
use crate::error::{GraphError, GraphResult};
use crate::graph::NodeIndex;

impl GraphMatrix {
    /// Parse and validate matrix text. Rows are labelled `1..=n`.
    pub fn parse(text: &str, matrix_type: MatrixType) -> GraphResult<GraphMatrix> {
        let rows = parse_rows(text)?;
        let vertex_indexes: Vec<NodeIndex> = (1..=rows.len() as u64).map(NodeIndex).collect();

        match matrix_type {
            MatrixType::Adjacency => {
                if rows.iter().flatten().any(|v| *v < 0.0) {
                    return Err(GraphError::validation(
                        "adjacency matrix cells must not be negative",
                    ));
                }
                GraphMatrix::adjacency(rows, vertex_indexes)
            }
            MatrixType::Incidence => GraphMatrix::incidence(rows, vertex_indexes, None),
        }
    }
}

fn parse_rows(text: &str) -> GraphResult<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (line, raw_row) in text
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .enumerate()
    {
        let row = raw_row
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|cell| !cell.is_empty())
            .map(|cell| {
                cell.parse::<i64>().map(|v| v as f64).map_err(|_| {
                    GraphError::validation(format!(
                        "row {}: '{}' is not an integer",
                        line + 1,
                        cell
                    ))
                })
            })
            .collect::<GraphResult<Vec<f64>>>()?;
        if row.is_empty() {
            return Err(GraphError::validation(format!("row {} is empty", line + 1)));
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(GraphError::validation("matrix is empty"));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adjacency_with_mixed_separators() {
        let matrix = GraphMatrix::parse("0 1, 0;\n1 0 2;\n0,2,0;", MatrixType::Adjacency).unwrap();
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.get(1, 2), Some(2.0));
        assert_eq!(matrix.vertex_indexes().last(), Some(&NodeIndex(3)));
    }

    #[test]
    fn test_parse_export_format_round_trip() {
        let text = "0, 3;\n3, 0;";
        let matrix = GraphMatrix::parse(text, MatrixType::Adjacency).unwrap();
        assert_eq!(matrix.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_non_square_adjacency() {
        assert!(matches!(
            GraphMatrix::parse("0 1 1;\n1 0 0;", MatrixType::Adjacency),
            Err(GraphError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(GraphMatrix::parse("0 x;\n1 0;", MatrixType::Adjacency).is_err());
        assert!(GraphMatrix::parse("  ;\n", MatrixType::Adjacency).is_err());
        assert!(GraphMatrix::parse("0 -1;\n-1 0;", MatrixType::Adjacency).is_err());
    }

    #[test]
    fn test_parse_incidence_signed_cells() {
        let matrix = GraphMatrix::parse("1, 1;\n-1, 0;\n0, 1;", MatrixType::Incidence).unwrap();
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.column_count(), 2);
        assert_eq!(matrix.get(1, 0), Some(-1.0));
        assert!(matrix.edge_indexes().is_none());
    }

    #[test]
    fn test_parse_incidence_ragged_rows() {
        assert!(matches!(
            GraphMatrix::parse("1 1;\n-1;", MatrixType::Incidence),
            Err(GraphError::ValidationError(_))
        ));
    }
}
