//! Test infrastructure for Arbor traversal testing
//!
//! Provides reusable graph fixtures, a recording visitor, and a store
//! wrapper that injects storage failures.

pub mod failing_store;
pub mod fixtures;
pub mod recording;

pub use failing_store::FailingStore;
pub use fixtures::{
    cycle_graph, dangling_graph, diamond_graph, graph_from_edges, init_tracing, tree_graph, vid,
    EDGES, VERTICES,
};
pub use recording::{record_visit, recording_traverser, Recording, Visit};
