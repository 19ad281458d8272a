//! Arbor Core - graph traversal over document/edge stores
//!
//! This crate implements the traversal engine:
//! - Document types (Vertex, Edge) and collection descriptors
//! - The level stack, path and uniqueness tracking
//! - Breadth-first, depth-first pre-order and post-order strategies
//! - The traverser with its filter/visit/expand protocol
//!
//! # Storage Boundary
//!
//! The engine performs no I/O of its own. Every vertex and edge lookup goes
//! through the injected `GraphStore` implementation.

pub mod config;
pub mod error;
pub mod graph;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::TraversalOptions;
pub use error::{ConfigError, TraversalError, TraversalResult};
pub use graph::{
    Connection, FilterDirective, Path, StartVertex, StrategyKind, Traverser, TraverserBuilder,
    Uniqueness, UniquenessPolicy, VisitControl, VisitOrder,
};
pub use storage::{GraphStore, StoreError, StoreResult};
pub use types::{CollectionInfo, CollectionKind, Direction, Edge, Vertex};
