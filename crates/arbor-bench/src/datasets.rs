//! Graph generation for benchmarks

use arbor_core::{CollectionKind, Edge, StoreResult, Vertex};
use arbor_storage::MemStore;
use rand::prelude::*;

pub const VERTICES: &str = "nodes";
pub const EDGES: &str = "links";

/// A generated graph and the vertex traversals start from
#[derive(Debug)]
pub struct GraphData {
    pub store: MemStore,
    pub root: String,
    pub vertex_count: usize,
    pub edge_count: usize,
}

fn vertex_id(index: usize) -> String {
    format!("{}/v{}", VERTICES, index)
}

fn empty_store(vertex_count: usize) -> StoreResult<MemStore> {
    let store = MemStore::new();
    store.create_collection(VERTICES, CollectionKind::Document)?;
    store.create_collection(EDGES, CollectionKind::Edge)?;
    for i in 0..vertex_count {
        store.insert_vertex(
            VERTICES,
            Vertex::new(vertex_id(i)).with_field("rank", i as u64),
        )?;
    }
    Ok(store)
}

/// Complete tree with `fanout` children per vertex, `depth` levels below the root
pub fn generate_tree(fanout: usize, depth: u32) -> StoreResult<GraphData> {
    let vertex_count: usize = (0..=depth).map(|d| fanout.pow(d)).sum();
    let store = empty_store(vertex_count)?;

    // Vertex i has children fanout*i + 1 ..= fanout*i + fanout
    let mut edge_count = 0;
    for parent in 0..vertex_count {
        for k in 1..=fanout {
            let child = parent * fanout + k;
            if child >= vertex_count {
                break;
            }
            store.insert_edge(
                EDGES,
                Edge::new(
                    format!("{}/e{}", EDGES, edge_count),
                    vertex_id(parent),
                    vertex_id(child),
                ),
            )?;
            edge_count += 1;
        }
    }

    Ok(GraphData {
        store,
        root: vertex_id(0),
        vertex_count,
        edge_count,
    })
}

/// Random directed graph with `avg_degree` outgoing edges per vertex
///
/// Cycles are likely, so traversals over it need PATH or GLOBAL vertex
/// uniqueness to terminate.
pub fn generate_graph(vertex_count: usize, avg_degree: usize, seed: u64) -> StoreResult<GraphData> {
    let mut rng = StdRng::seed_from_u64(seed);
    let store = empty_store(vertex_count)?;

    let mut edge_count = 0;
    for from in 0..vertex_count {
        for _ in 0..avg_degree {
            let to = rng.gen_range(0..vertex_count);
            if to == from {
                continue;
            }
            store.insert_edge(
                EDGES,
                Edge::new(
                    format!("{}/e{}", EDGES, edge_count),
                    vertex_id(from),
                    vertex_id(to),
                )
                .with_field("weight", rng.gen_range(0.0..1.0)),
            )?;
            edge_count += 1;
        }
    }

    Ok(GraphData {
        store,
        root: vertex_id(0),
        vertex_count,
        edge_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::GraphStore;

    #[test]
    fn test_generate_tree_shape() {
        let tree = generate_tree(3, 2).unwrap();
        assert_eq!(tree.vertex_count, 13);
        assert_eq!(tree.edge_count, 12);

        let children = tree.store.out_edges(EDGES, &tree.root).unwrap();
        let targets: Vec<&str> = children.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(targets, vec!["nodes/v1", "nodes/v2", "nodes/v3"]);
    }

    #[test]
    fn test_generate_graph_is_deterministic() {
        let a = generate_graph(50, 4, 7).unwrap();
        let b = generate_graph(50, 4, 7).unwrap();
        assert_eq!(a.edge_count, b.edge_count);
        assert_eq!(
            a.store.all_edges(EDGES).unwrap(),
            b.store.all_edges(EDGES).unwrap()
        );
    }
}
