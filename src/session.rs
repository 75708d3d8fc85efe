//! Interactive session state
//!
//! Owns the live graph together with the state the editing front-end keeps
//! beside it, such as whether force-directed layout is running. Algorithm jobs
//! are always submitted against a snapshot, so the session stays free to
//! mutate its graph while a job runs.

use crate::algo::{AlgorithmJob, AlgorithmRequest, AlgorithmWorker};
use crate::config::EngineConfig;
use crate::error::GraphResult;
use crate::generator::{GenerationOptions, GraphGenerator};
use crate::graph::{Graph, GraphOrientation};
use crate::matrix::{build_graph_from_matrix, build_matrix_from_graph, GraphMatrix, MatrixType};
use crate::set::{build_graph_from_sets, GraphSet, SetType};
use rand::Rng;
use std::mem;
use tracing::info;

pub struct GraphSession {
    graph: Graph,
    force_mode: bool,
    generator: GraphGenerator,
    worker: AlgorithmWorker,
}

impl GraphSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            graph: Graph::default(),
            force_mode: false,
            generator: GraphGenerator::new(config.generator),
            worker: AlgorithmWorker::new(config.worker),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for [`GraphService`](crate::graph::GraphService) calls
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Swap in a new graph and hand back the previous one
    pub fn replace_graph(&mut self, graph: Graph) -> Graph {
        info!(
            "Replacing graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        mem::replace(&mut self.graph, graph)
    }

    pub fn is_force_mode(&self) -> bool {
        self.force_mode
    }

    pub fn set_force_mode(&mut self, active: bool) {
        self.force_mode = active;
    }

    /// Flip force mode and return the new state
    pub fn toggle_force_mode(&mut self) -> bool {
        self.force_mode = !self.force_mode;
        self.force_mode
    }

    pub fn generate(&mut self, options: &GenerationOptions) -> GraphResult<&Graph> {
        let graph = self.generator.generate(options)?;
        self.replace_graph(graph);
        Ok(&self.graph)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &mut self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> GraphResult<&Graph> {
        let graph = self.generator.generate_with_rng(options, rng)?;
        self.replace_graph(graph);
        Ok(&self.graph)
    }

    pub fn matrix(&self, matrix_type: MatrixType) -> GraphResult<GraphMatrix> {
        build_matrix_from_graph(&self.graph, matrix_type)
    }

    pub fn load_matrix(&mut self, matrix: &GraphMatrix) -> GraphResult<&Graph> {
        let graph = build_graph_from_matrix(matrix)?;
        self.replace_graph(graph);
        Ok(&self.graph)
    }

    pub fn set(&self, set_type: SetType) -> GraphResult<GraphSet> {
        GraphSet::from_graph(&self.graph, set_type)
    }

    pub fn load_sets(
        &mut self,
        vertices: &GraphSet,
        edges: &GraphSet,
        orientation: GraphOrientation,
    ) -> GraphResult<&Graph> {
        let graph = build_graph_from_sets(vertices, edges, orientation)?;
        self.replace_graph(graph);
        Ok(&self.graph)
    }

    /// Start an algorithm job on a snapshot of the current graph
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, request: AlgorithmRequest) -> GraphResult<AlgorithmJob> {
        self.worker.submit(request, &self.graph)
    }
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
