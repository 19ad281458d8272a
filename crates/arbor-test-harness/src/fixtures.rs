//! Graph fixtures
//!
//! Every fixture stores vertices in the document collection `nodes` and
//! edges in the edge collection `edges`. Vertices are named by key; edges
//! get ids `edges/0`, `edges/1`, ... in the order given, which is also
//! their adjacency order.

use arbor_core::{CollectionKind, Edge, StoreResult, Vertex};
use arbor_storage::MemStore;

/// Document collection holding fixture vertices
pub const VERTICES: &str = "nodes";

/// Edge collection holding fixture edges
pub const EDGES: &str = "edges";

/// Full vertex id for a fixture key
pub fn vid(key: &str) -> String {
    format!("{}/{}", VERTICES, key)
}

/// Build a store from vertex keys and `(from, to)` key pairs
///
/// Edge endpoints are not required to be in `vertices`.
pub fn graph_from_edges(vertices: &[&str], edges: &[(&str, &str)]) -> StoreResult<MemStore> {
    let store = MemStore::new();
    store.create_collection(VERTICES, CollectionKind::Document)?;
    store.create_collection(EDGES, CollectionKind::Edge)?;

    for key in vertices {
        store.insert_vertex(VERTICES, Vertex::new(vid(key)).with_field("name", *key))?;
    }
    for (i, (from, to)) in edges.iter().enumerate() {
        store.insert_edge(
            EDGES,
            Edge::new(format!("{}/{}", EDGES, i), vid(from), vid(to)),
        )?;
    }

    Ok(store)
}

/// `root -> a -> c`, `root -> b`
pub fn tree_graph() -> StoreResult<MemStore> {
    graph_from_edges(
        &["root", "a", "b", "c"],
        &[("root", "a"), ("root", "b"), ("a", "c")],
    )
}

/// `a -> b -> a`
pub fn cycle_graph() -> StoreResult<MemStore> {
    graph_from_edges(&["a", "b"], &[("a", "b"), ("b", "a")])
}

/// `root -> a -> d`, `root -> b -> d`, `d -> e`
pub fn diamond_graph() -> StoreResult<MemStore> {
    graph_from_edges(
        &["root", "a", "b", "d", "e"],
        &[("root", "a"), ("root", "b"), ("a", "d"), ("b", "d"), ("d", "e")],
    )
}

/// `root -> a -> ghost` where `ghost` was never stored
pub fn dangling_graph() -> StoreResult<MemStore> {
    graph_from_edges(&["root", "a"], &[("root", "a"), ("a", "ghost")])
}

/// Install a test-friendly tracing subscriber (respects `RUST_LOG`)
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
