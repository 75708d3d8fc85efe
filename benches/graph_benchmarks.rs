use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use graphedit::algo::{AlgorithmCalculator, CancellationFlag, DijkstraCalculator};
use graphedit::config::GeneratorConfig;
use graphedit::generator::{GenerationOptions, GraphGenerator};
use graphedit::graph::{Edge, EdgeOrientation, Graph, GraphOrientation, GraphService, NodeIndex};
use graphedit::matrix::{build_graph_from_matrix, build_matrix_from_graph, MatrixType};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generator(max_nodes: usize) -> GraphGenerator {
    GraphGenerator::new(GeneratorConfig { max_nodes })
}

/// Benchmark random graph generation
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for size in [20u32, 100, 400].iter() {
        let options = GenerationOptions {
            graph_orientation: GraphOrientation::Oriented,
            fixed_nodes_number: *size,
            edges_probability: 1.0,
            edge_weight_specify: true,
            ..GenerationOptions::default()
        };
        let generator = generator(*size as usize);
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| generator.generate_with_rng(options, &mut rng).unwrap());
        });
    }
    group.finish();
}

/// Grid graph with `side * side` nodes and non-oriented unit edges
fn grid(side: u64) -> Graph {
    let mut graph = Graph::new(GraphOrientation::NonOriented);
    for _ in 0..side * side {
        GraphService::add_node(&mut graph, None, None).unwrap();
    }
    for row in 0..side {
        for col in 0..side {
            let index = row * side + col + 1;
            if col + 1 < side {
                let right = Edge::new(index, index + 1, EdgeOrientation::NonOriented);
                GraphService::add_edge(&mut graph, right).unwrap();
            }
            if row + 1 < side {
                let down = Edge::new(index, index + side, EdgeOrientation::NonOriented);
                GraphService::add_edge(&mut graph, down).unwrap();
            }
        }
    }
    graph
}

/// Benchmark Dijkstra corner to corner on grids
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for side in [10u64, 30, 60].iter() {
        let graph = grid(*side);
        let calculator = DijkstraCalculator {
            start_node: NodeIndex(1),
            end_node: NodeIndex(side * side),
        };
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &graph, |b, graph| {
            b.iter(|| {
                let result = calculator.calculate(graph, &CancellationFlag::new()).unwrap();
                criterion::black_box(result);
            });
        });
    }
    group.finish();
}

/// Benchmark matrix encode and decode
fn bench_matrix_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_round_trip");
    let graph = grid(20);

    for matrix_type in [MatrixType::Adjacency, MatrixType::Incidence] {
        group.bench_function(format!("{:?}", matrix_type), |b| {
            b.iter(|| {
                let matrix = build_matrix_from_graph(&graph, matrix_type).unwrap();
                criterion::black_box(build_graph_from_matrix(&matrix).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_dijkstra, bench_matrix_round_trip);
criterion_main!(benches);
