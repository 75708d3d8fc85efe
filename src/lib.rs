//! Graphedit
//!
//! Graph model and editing engine for an interactive graph editor, with
//! matrix/set conversion, random generation and an isolated algorithm worker.
//!
//! # Layout
//!
//! - [`graph`]: nodes, edges, the [`Graph`] aggregate and [`GraphService`],
//!   the mutation/query engine that keeps them consistent
//! - [`matrix`]: adjacency and incidence matrices, both ways
//! - [`set`]: vertex and edge sets, both ways
//! - [`generator`]: random graphs and n-ary trees
//! - [`algo`]: BFS, DFS and Dijkstra, run on a snapshot by the worker
//! - [`session`]: the live graph plus front-end state
//!
//! ## Example Usage
//!
//! ```rust
//! use graphedit::graph::{Edge, EdgeOrientation, Graph, GraphOrientation, GraphService};
//! use graphedit::matrix::{build_matrix_from_graph, MatrixType};
//!
//! let mut graph = Graph::new(GraphOrientation::Oriented);
//! let a = GraphService::add_node(&mut graph, None, None).unwrap();
//! let b = GraphService::add_node(&mut graph, None, Some("b".to_string())).unwrap();
//! GraphService::add_edge(&mut graph, Edge::new(a, b, EdgeOrientation::Oriented)).unwrap();
//!
//! let matrix = build_matrix_from_graph(&graph, MatrixType::Adjacency).unwrap();
//! assert_eq!(matrix.to_string(), "0, 1;\n0, 0;");
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod matrix;
pub mod session;
pub mod set;

// Re-export main types for convenience
pub use algo::{
    Algorithm, AlgorithmJob, AlgorithmRequest, AlgorithmResult, AlgorithmWorker,
    CancellationFlag, WorkerResponse,
};
pub use config::EngineConfig;
pub use error::{GraphError, GraphResult};
pub use generator::{GenerationOptions, GraphGenerator};
pub use graph::{
    Edge, EdgeIndex, EdgeOrientation, Graph, GraphOrientation, GraphService, GraphType, Node,
    NodeIndex,
};
pub use matrix::{GraphMatrix, MatrixType};
pub use session::GraphSession;
pub use set::{GraphSet, SetType};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
