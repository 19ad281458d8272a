//! Arbor command line
//!
//! Loads a JSON graph snapshot and prints one traversal, one vertex per
//! line, indented by its depth on the current path.
//!
//! ```text
//! arbor <snapshot.json> <edge-collection> <start-vertex> [strategy]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Log level (default: info)
//! - `ARBOR_STRATEGY` - Visitation strategy when not given as an argument
//! - `ARBOR_VERTEX_UNIQUENESS` - `none` (default), `path` or `global`
//! - `ARBOR_EDGE_UNIQUENESS` - `none` (default), `path` or `global`
//! - `ARBOR_DIRECTION` - `outbound` (default) or `inbound`
//! - `ARBOR_MAX_DEPTH` - Do not expand vertices at this depth

use arbor_core::config::ENV_STRATEGY;
use arbor_core::{
    ConfigError, FilterDirective, GraphStore, Path, StoreError, TraversalError, TraversalOptions,
    Traverser, TraverserBuilder, Vertex, VisitControl,
};
use arbor_storage::MemStore;
use std::env;
use std::fs::File;
use std::io::BufReader;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: arbor <snapshot.json> <edge-collection> <start-vertex> [strategy]";

const ENV_MAX_DEPTH: &str = "ARBOR_MAX_DEPTH";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

/// Positional arguments
#[derive(Debug, Clone, PartialEq)]
struct Args {
    snapshot: String,
    edge_collection: String,
    start: String,
    strategy: Option<String>,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self, CliError> {
        match args {
            [snapshot, edge_collection, start] | [snapshot, edge_collection, start, _] => {
                Ok(Self {
                    snapshot: snapshot.clone(),
                    edge_collection: edge_collection.clone(),
                    start: start.clone(),
                    strategy: args.get(3).cloned(),
                })
            }
            _ => Err(CliError::Usage(USAGE)),
        }
    }
}

/// Traversal options from the environment, with an explicit strategy
/// argument taking precedence over `ARBOR_STRATEGY`
fn load_options(
    strategy: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<TraversalOptions, ConfigError> {
    TraversalOptions::from_lookup(|key| match (key, strategy) {
        (ENV_STRATEGY, Some(strategy)) => Some(strategy.to_string()),
        _ => lookup(key),
    })
}

fn parse_max_depth(value: Option<String>) -> Result<Option<usize>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse().map_err(|_| ConfigError::InvalidParameter {
                name: "max_depth",
                message: format!("'{}' is not a depth", v),
            })
        })
        .transpose()
}

/// One output line: the vertex id indented two spaces per path edge
fn render_line(vertex: &Vertex, path: &Path) -> String {
    format!("{}{}", "  ".repeat(path.len()), vertex.id())
}

fn depth_filter<G>(
    _traverser: &Traverser<G, Option<usize>, Vec<String>>,
    _vertex: &Vertex,
    path: &Path,
    max_depth: &Option<usize>,
    _lines: &mut Vec<String>,
) -> FilterDirective {
    match max_depth {
        Some(max) if path.len() >= *max => FilterDirective::IncludeAndPrune,
        _ => FilterDirective::IncludeAndContinue,
    }
}

fn print_visitor<G>(
    _traverser: &Traverser<G, Option<usize>, Vec<String>>,
    vertex: &Vertex,
    path: &Path,
    _max_depth: &Option<usize>,
    lines: &mut Vec<String>,
) -> Result<VisitControl, TraversalError> {
    lines.push(render_line(vertex, path));
    Ok(VisitControl::Continue)
}

/// Run one traversal and return the rendered lines
///
/// Lines produced before a failure are returned alongside the error.
fn traverse<G: GraphStore + 'static>(
    store: G,
    args: &Args,
    options: &TraversalOptions,
    max_depth: Option<usize>,
) -> (Vec<String>, Result<(), CliError>) {
    let mut lines = Vec::new();
    let traverser = match TraverserBuilder::new(store, args.edge_collection.as_str())
        .direction(options.direction)
        .filter(depth_filter::<G>)
        .visitor(print_visitor::<G>)
        .build()
    {
        Ok(traverser) => traverser,
        Err(e) => return (lines, Err(e.into())),
    };

    let result = traverser
        .run(args.start.as_str(), options, &max_depth, &mut lines)
        .map_err(CliError::from);
    (lines, result)
}

fn run(raw_args: &[String]) -> Result<(), CliError> {
    let args = Args::parse(raw_args)?;
    let options = load_options(args.strategy.as_deref(), |key| env::var(key).ok())?;
    let max_depth = parse_max_depth(env::var(ENV_MAX_DEPTH).ok())?;

    let file = File::open(&args.snapshot).map_err(|source| CliError::Open {
        path: args.snapshot.clone(),
        source,
    })?;
    let store = MemStore::load_json(BufReader::new(file))?;

    info!(
        snapshot = %args.snapshot,
        collection = %args.edge_collection,
        start = %args.start,
        strategy = options.strategy.as_str(),
        direction = options.direction.as_str(),
        "Running traversal"
    );

    let (lines, result) = traverse(store, &args, &options, max_depth);
    for line in &lines {
        println!("{}", line);
    }
    info!(visited = lines.len(), "Traversal finished");
    result
}

fn main() {
    // Initialize structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
