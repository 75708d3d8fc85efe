//! Graphedit CLI: command-line front-end for the graphedit engine
//!
//! Graphs are exchanged as full JSON files, the same form the algorithm
//! worker consumes.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use graphedit::algo::{AlgorithmRequest, AlgorithmResult, PathResult, TraversalResult};
use graphedit::generator::GenerationOptions;
use graphedit::graph::{Graph, GraphOrientation, GraphType, NodeIndex};
use graphedit::matrix::{build_graph_from_matrix, GraphMatrix, MatrixType};
use graphedit::set::{GraphSet, SetType};
use graphedit::{EngineConfig, GraphSession};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphedit", version, about = "Graphedit graph engine CLI")]
struct Cli {
    /// Engine configuration file (YAML)
    #[arg(long, global = true, env = "GRAPHEDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixKind {
    Adjacency,
    Incidence,
}

impl From<MatrixKind> for MatrixType {
    fn from(kind: MatrixKind) -> Self {
        match kind {
            MatrixKind::Adjacency => MatrixType::Adjacency,
            MatrixKind::Incidence => MatrixType::Incidence,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TraversalKind {
    Bfs,
    Dfs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random graph
    Generate {
        /// Generation options as JSON (camelCase fields)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Fixed number of nodes, overriding the options file
        #[arg(long)]
        nodes: Option<u32>,

        /// Generate an n-ary tree
        #[arg(long)]
        tree: bool,

        /// Generate oriented edges
        #[arg(long)]
        oriented: bool,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full JSON graph here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the matrix of a graph
    Matrix {
        /// Full JSON graph file
        graph: PathBuf,

        #[arg(long = "type", value_enum, default_value = "adjacency")]
        kind: MatrixKind,
    },
    /// Build a graph from matrix text such as "0 1; 1 0"
    FromMatrix {
        text: String,

        #[arg(long = "type", value_enum, default_value = "adjacency")]
        kind: MatrixKind,

        /// Write the full JSON graph here
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the vertex and edge sets of a graph
    Sets {
        /// Full JSON graph file
        graph: PathBuf,
    },
    /// Shortest path between two nodes (Dijkstra)
    Path {
        /// Full JSON graph file
        graph: PathBuf,
        start: u64,
        end: u64,
    },
    /// Breadth- or depth-first traversal from a node
    Traverse {
        /// Full JSON graph file
        graph: PathBuf,
        start: u64,

        #[arg(long, value_enum, default_value = "bfs")]
        algorithm: TraversalKind,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    let mut session = GraphSession::new(config);

    match cli.command {
        Commands::Generate {
            options,
            nodes,
            tree,
            oriented,
            seed,
            output,
        } => {
            let mut options = match options {
                Some(path) => GenerationOptions::from_json_str(&read(&path)?)?,
                None => GenerationOptions::default(),
            };
            if let Some(nodes) = nodes {
                options.fixed_number_of_nodes = true;
                options.fixed_nodes_number = nodes;
            }
            if tree {
                options.graph_type = GraphType::Tree;
            }
            if oriented {
                options.graph_orientation = GraphOrientation::Oriented;
            }
            match seed {
                Some(seed) => {
                    session.generate_with_rng(&options, &mut StdRng::seed_from_u64(seed))?
                }
                None => session.generate(&options)?,
            };
            emit_graph(session.graph(), output.as_deref(), &cli.format)
        }
        Commands::Matrix { graph, kind } => {
            session.replace_graph(load_graph(&graph)?);
            let matrix = session.matrix(kind.into())?;
            print_matrix(&matrix, &cli.format)
        }
        Commands::FromMatrix { text, kind, output } => {
            let matrix = GraphMatrix::parse(&text, kind.into())?;
            let graph = build_graph_from_matrix(&matrix)?;
            emit_graph(&graph, output.as_deref(), &cli.format)
        }
        Commands::Sets { graph } => {
            session.replace_graph(load_graph(&graph)?);
            let vertices = session.set(SetType::Vertices)?;
            let edges = session.set(SetType::Edges)?;
            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "vertices": vertices.tokens(),
                        "edges": edges.tokens(),
                    }))?
                ),
                OutputFormat::Table => {
                    println!("V = {{{}}}", vertices);
                    println!("E = {{{}}}", edges);
                }
            }
            Ok(())
        }
        Commands::Path { graph, start, end } => {
            session.replace_graph(load_graph(&graph)?);
            let request = AlgorithmRequest::Dijkstra {
                start_node: NodeIndex(start),
                end_node: NodeIndex(end),
            };
            run_algorithm(&session, request, &cli.format).await
        }
        Commands::Traverse {
            graph,
            start,
            algorithm,
        } => {
            session.replace_graph(load_graph(&graph)?);
            let start_node = NodeIndex(start);
            let request = match algorithm {
                TraversalKind::Bfs => AlgorithmRequest::Bfs { start_node },
                TraversalKind::Dfs => AlgorithmRequest::Dfs { start_node },
            };
            run_algorithm(&session, request, &cli.format).await
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_graph(path: &Path) -> Result<Graph> {
    let graph = Graph::from_full_json_str(&read(path)?)
        .with_context(|| format!("loading graph {}", path.display()))?;
    debug!(
        "Loaded {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

fn emit_graph(graph: &Graph, output: Option<&Path>, format: &OutputFormat) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, graph.to_full_json_string()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Wrote {} nodes and {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph.to_full_json())?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Edge", "From", "To", "Orientation", "Weight"]);
            for edge in graph.edges() {
                table.add_row(vec![
                    edge.key().to_string(),
                    edge.first_node.to_string(),
                    edge.second_node.to_string(),
                    format!("{:?}", edge.orientation),
                    edge.weight.to_string(),
                ]);
            }
            println!("{}", table);
            println!(
                "{:?} {:?} graph: {} node(s), {} edge(s)",
                graph.orientation(),
                graph.graph_type(),
                graph.node_count(),
                graph.edge_count()
            );
        }
    }
    Ok(())
}

fn print_matrix(matrix: &GraphMatrix, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(matrix)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            let mut header = vec![String::new()];
            match matrix.edge_indexes() {
                Some(keys) => header.extend(keys.iter().cloned()),
                None => header.extend(matrix.vertex_indexes().iter().map(|v| v.to_string())),
            }
            table.set_header(header);
            for (vertex, row) in matrix.vertex_indexes().iter().zip(matrix.rows()) {
                let mut cells = vec![vertex.to_string()];
                cells.extend(row.iter().map(|v| v.to_string()));
                table.add_row(cells);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

async fn run_algorithm(
    session: &GraphSession,
    request: AlgorithmRequest,
    format: &OutputFormat,
) -> Result<()> {
    let response = session.submit(request)?.response().await;
    if response.is_error() {
        warn!("Algorithm job returned an error");
    }

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match response.into_result().map_err(|message| anyhow!(message))? {
        AlgorithmResult::ShortestPath(result) => print_path(&result),
        AlgorithmResult::Traversal(result) => print_traversal(&result),
    }
    Ok(())
}

fn print_path(result: &PathResult) {
    let path: Vec<String> = result.path.iter().map(|n| n.to_string()).collect();
    println!("Path:     {}", path.join(" -> "));
    println!("Distance: {}", result.distance);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Current", "Neighbor", "Distance"]);
    for checked in &result.checked_paths {
        table.add_row(vec![
            checked.current_node.to_string(),
            checked.neighbor_node.to_string(),
            checked.distance.to_string(),
        ]);
    }
    println!("{}", table);
    println!("{} relaxation(s)", result.checked_paths.len());
}

fn print_traversal(result: &TraversalResult) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["From", "Discovered"]);
    for edge in &result.edges {
        table.add_row(vec![edge.first_node.to_string(), edge.second_node.to_string()]);
    }
    println!("{}", table);
    println!(
        "{} from node {}: {} node(s) discovered",
        result.algorithm, result.start_node, result.discovered
    );
}
