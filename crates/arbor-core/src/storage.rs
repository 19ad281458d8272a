//! Storage abstraction layer
//!
//! This module defines the `GraphStore` trait, the only way the traversal
//! engine reaches documents. The engine never owns vertices or edges; it
//! asks the store for them while walking and drops them when the run ends.
//!
//! # Implementations
//!
//! - `MemStore` (arbor-storage): in-memory collections for embedding and tests
//! - `FailingStore` (arbor-test-harness): failure injection wrapper

use crate::types::{CollectionInfo, Direction, Edge, Vertex};
use std::sync::Arc;
use thiserror::Error;

/// Storage operation errors
///
/// All errors are explicit - storage operations never silently fail.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("Invalid collection name: '{name}'")]
    InvalidCollectionName { name: String },

    /// Operation requires a collection of another kind
    #[error("Collection '{name}' is not an {expected} collection")]
    WrongCollectionKind { name: String, expected: &'static str },

    #[error("Duplicate document: {id}")]
    DuplicateDocument { id: String },

    #[error("Invalid document '{id}': {reason}")]
    InvalidDocument { id: String, reason: String },
}

/// Convenience type alias for storage results
pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract document/edge store (storage boundary)
///
/// Lookups are synchronous; a traversal runs to completion on the caller's
/// thread and the store calls are its only suspension points.
///
/// # Ordering
///
/// `out_edges` and `in_edges` must return edges in a stable order. The
/// default expanders hand that order to the strategies unchanged.
pub trait GraphStore {
    /// Resolve a collection by name
    fn resolve_collection(&self, name: &str) -> StoreResult<Option<CollectionInfo>>;

    /// Resolve a vertex document by id
    fn resolve_vertex(&self, id: &str) -> StoreResult<Option<Vertex>>;

    /// Edges in `collection` whose `_from` is `vertex_id`
    fn out_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>>;

    /// Edges in `collection` whose `_to` is `vertex_id`
    fn in_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>>;

    /// Resolve the vertex reached by following `edge` in `direction`
    fn resolve_edge_endpoint(
        &self,
        edge: &Edge,
        direction: Direction,
    ) -> StoreResult<Option<Vertex>> {
        self.resolve_vertex(edge.endpoint(direction))
    }

    /// Edges adjacent to `vertex_id` in the given direction
    fn edges(
        &self,
        collection: &str,
        vertex_id: &str,
        direction: Direction,
    ) -> StoreResult<Vec<Edge>> {
        match direction {
            Direction::Outbound => self.out_edges(collection, vertex_id),
            Direction::Inbound => self.in_edges(collection, vertex_id),
        }
    }
}

impl<T: GraphStore + ?Sized> GraphStore for &T {
    fn resolve_collection(&self, name: &str) -> StoreResult<Option<CollectionInfo>> {
        (**self).resolve_collection(name)
    }

    fn resolve_vertex(&self, id: &str) -> StoreResult<Option<Vertex>> {
        (**self).resolve_vertex(id)
    }

    fn out_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        (**self).out_edges(collection, vertex_id)
    }

    fn in_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        (**self).in_edges(collection, vertex_id)
    }

    fn resolve_edge_endpoint(
        &self,
        edge: &Edge,
        direction: Direction,
    ) -> StoreResult<Option<Vertex>> {
        (**self).resolve_edge_endpoint(edge, direction)
    }
}

impl<T: GraphStore + ?Sized> GraphStore for Arc<T> {
    fn resolve_collection(&self, name: &str) -> StoreResult<Option<CollectionInfo>> {
        (**self).resolve_collection(name)
    }

    fn resolve_vertex(&self, id: &str) -> StoreResult<Option<Vertex>> {
        (**self).resolve_vertex(id)
    }

    fn out_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        (**self).out_edges(collection, vertex_id)
    }

    fn in_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        (**self).in_edges(collection, vertex_id)
    }

    fn resolve_edge_endpoint(
        &self,
        edge: &Edge,
        direction: Direction,
    ) -> StoreResult<Option<Vertex>> {
        (**self).resolve_edge_endpoint(edge, direction)
    }
}
