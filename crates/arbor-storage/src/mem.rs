//! In-memory store implementation
//!
//! `MemStore` keeps named document and edge collections in a
//! `RwLock<HashMap>`. Edge collections index their edges by `_from` and
//! `_to` so adjacency lookups return edges in insertion order.

use arbor_core::types::split_id;
use arbor_core::{
    CollectionInfo, CollectionKind, Edge, GraphStore, StoreError, StoreResult, Vertex,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One named collection
#[derive(Debug)]
struct Collection {
    kind: CollectionKind,
    /// Vertex documents by id (document collections)
    vertices: HashMap<String, Vertex>,
    /// Edge documents in insertion order (edge collections)
    edges: Vec<Edge>,
    edge_ids: HashMap<String, usize>,
    /// `_from` id -> positions in `edges`
    outbound: HashMap<String, Vec<usize>>,
    /// `_to` id -> positions in `edges`
    inbound: HashMap<String, Vec<usize>>,
}

impl Collection {
    fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            vertices: HashMap::new(),
            edges: Vec::new(),
            edge_ids: HashMap::new(),
            outbound: HashMap::new(),
            inbound: HashMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.vertices.len() + self.edges.len()
    }

    fn adjacent(&self, index: &HashMap<String, Vec<usize>>, vertex_id: &str) -> Vec<Edge> {
        index.get(vertex_id).map_or_else(Vec::new, |positions| {
            positions.iter().map(|&i| self.edges[i].clone()).collect()
        })
    }
}

/// In-memory graph store
///
/// Uses `RwLock<HashMap>` for thread-safe access.
/// All data is lost when the instance is dropped.
///
/// # Usage
///
/// ```ignore
/// use arbor_core::{CollectionKind, Edge, Vertex};
/// use arbor_storage::MemStore;
///
/// let store = MemStore::new();
/// store.create_collection("users", CollectionKind::Document)?;
/// store.create_collection("knows", CollectionKind::Edge)?;
/// store.insert_vertex("users", Vertex::new("users/alice"))?;
/// store.insert_vertex("users", Vertex::new("users/bob"))?;
/// store.insert_edge("knows", Edge::new("knows/1", "users/alice", "users/bob"))?;
/// ```
#[derive(Debug, Default)]
pub struct MemStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection
    ///
    /// Creating an existing collection again with the same kind is a no-op.
    pub fn create_collection(&self, name: &str, kind: CollectionKind) -> StoreResult<()> {
        if name.is_empty() || name.contains('/') {
            return Err(StoreError::InvalidCollectionName {
                name: name.to_string(),
            });
        }

        let mut collections = self.write()?;
        match collections.get(name) {
            Some(existing) if existing.kind == kind => Ok(()),
            Some(_) => Err(StoreError::WrongCollectionKind {
                name: name.to_string(),
                expected: kind_name(kind),
            }),
            None => {
                collections.insert(name.to_string(), Collection::new(kind));
                tracing::debug!(collection = name, kind = ?kind, "Created collection");
                Ok(())
            }
        }
    }

    /// Insert a vertex into a document collection
    pub fn insert_vertex(&self, collection: &str, vertex: Vertex) -> StoreResult<()> {
        check_id(collection, &vertex.id)?;

        let mut collections = self.write()?;
        let target = collection_mut(&mut collections, collection, CollectionKind::Document)?;
        if target.vertices.contains_key(&vertex.id) {
            return Err(StoreError::DuplicateDocument { id: vertex.id });
        }
        target.vertices.insert(vertex.id.clone(), vertex);
        Ok(())
    }

    /// Insert an edge into an edge collection
    ///
    /// Endpoints are not checked for existence; a dangling edge is only
    /// detected when a traversal tries to follow it.
    pub fn insert_edge(&self, collection: &str, edge: Edge) -> StoreResult<()> {
        check_id(collection, &edge.id)?;
        for (attribute, endpoint) in [("_from", &edge.from), ("_to", &edge.to)] {
            if split_id(endpoint).is_none() {
                return Err(StoreError::InvalidDocument {
                    id: edge.id.clone(),
                    reason: format!("{} '{}' is not a document id", attribute, endpoint),
                });
            }
        }

        let mut collections = self.write()?;
        let target = collection_mut(&mut collections, collection, CollectionKind::Edge)?;
        if target.edge_ids.contains_key(&edge.id) {
            return Err(StoreError::DuplicateDocument { id: edge.id });
        }

        let position = target.edges.len();
        target.edge_ids.insert(edge.id.clone(), position);
        target
            .outbound
            .entry(edge.from.clone())
            .or_default()
            .push(position);
        target
            .inbound
            .entry(edge.to.clone())
            .or_default()
            .push(position);
        target.edges.push(edge);
        Ok(())
    }

    /// Get the number of collections
    pub fn collection_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    /// Get the number of documents (vertices and edges) across all collections
    pub fn document_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.values().map(Collection::len).sum())
    }

    /// Collection descriptors, sorted by name
    pub fn collections(&self) -> StoreResult<Vec<CollectionInfo>> {
        let collections = self.read()?;
        let mut infos: Vec<CollectionInfo> = collections
            .iter()
            .map(|(name, c)| CollectionInfo::new(name.clone(), c.kind))
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    /// Vertices of a document collection, sorted by id
    pub fn vertices(&self, collection: &str) -> StoreResult<Vec<Vertex>> {
        let collections = self.read()?;
        let target = collection_ref(&collections, collection, CollectionKind::Document)?;
        let mut vertices: Vec<Vertex> = target.vertices.values().cloned().collect();
        vertices.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(vertices)
    }

    /// Edges of an edge collection in insertion order
    pub fn all_edges(&self, collection: &str) -> StoreResult<Vec<Edge>> {
        let collections = self.read()?;
        let target = collection_ref(&collections, collection, CollectionKind::Edge)?;
        Ok(target.edges.clone())
    }

    /// Clear all data
    pub fn clear(&self) -> StoreResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Collection>>> {
        self.collections.read().map_err(|e| StoreError::Io {
            message: format!("Lock poisoned: {}", e),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Collection>>> {
        self.collections.write().map_err(|e| StoreError::Io {
            message: format!("Lock poisoned: {}", e),
        })
    }
}

impl GraphStore for MemStore {
    fn resolve_collection(&self, name: &str) -> StoreResult<Option<CollectionInfo>> {
        let collections = self.read()?;
        Ok(collections
            .get(name)
            .map(|c| CollectionInfo::new(name, c.kind)))
    }

    fn resolve_vertex(&self, id: &str) -> StoreResult<Option<Vertex>> {
        let Some((collection, _)) = split_id(id) else {
            return Ok(None);
        };
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.vertices.get(id))
            .cloned())
    }

    fn out_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        let collections = self.read()?;
        let target = collection_ref(&collections, collection, CollectionKind::Edge)?;
        Ok(target.adjacent(&target.outbound, vertex_id))
    }

    fn in_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        let collections = self.read()?;
        let target = collection_ref(&collections, collection, CollectionKind::Edge)?;
        Ok(target.adjacent(&target.inbound, vertex_id))
    }
}

fn kind_name(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Document => "document",
        CollectionKind::Edge => "edge",
    }
}

/// Documents must be qualified with the collection they are stored in
fn check_id(collection: &str, id: &str) -> StoreResult<()> {
    match split_id(id) {
        Some((prefix, _)) if prefix == collection => Ok(()),
        Some((prefix, _)) => Err(StoreError::InvalidDocument {
            id: id.to_string(),
            reason: format!("id belongs to '{}', not '{}'", prefix, collection),
        }),
        None => Err(StoreError::InvalidDocument {
            id: id.to_string(),
            reason: "expected an id of the form collection/key".into(),
        }),
    }
}

fn collection_ref<'a>(
    collections: &'a HashMap<String, Collection>,
    name: &str,
    kind: CollectionKind,
) -> StoreResult<&'a Collection> {
    let collection = collections
        .get(name)
        .ok_or_else(|| StoreError::CollectionNotFound {
            name: name.to_string(),
        })?;
    if collection.kind != kind {
        return Err(StoreError::WrongCollectionKind {
            name: name.to_string(),
            expected: kind_name(kind),
        });
    }
    Ok(collection)
}

fn collection_mut<'a>(
    collections: &'a mut HashMap<String, Collection>,
    name: &str,
    kind: CollectionKind,
) -> StoreResult<&'a mut Collection> {
    let collection = collections
        .get_mut(name)
        .ok_or_else(|| StoreError::CollectionNotFound {
            name: name.to_string(),
        })?;
    if collection.kind != kind {
        return Err(StoreError::WrongCollectionKind {
            name: name.to_string(),
            expected: kind_name(kind),
        });
    }
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::Direction;

    fn store() -> MemStore {
        let store = MemStore::new();
        store
            .create_collection("nodes", CollectionKind::Document)
            .unwrap();
        store.create_collection("links", CollectionKind::Edge).unwrap();
        for id in ["nodes/a", "nodes/b", "nodes/c"] {
            store.insert_vertex("nodes", Vertex::new(id)).unwrap();
        }
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemStore::new();
        assert_eq!(store.collection_count().unwrap(), 0);
        assert_eq!(store.document_count().unwrap(), 0);
    }

    #[test]
    fn test_resolve_collection() {
        let store = store();
        let info = store.resolve_collection("links").unwrap().unwrap();
        assert!(info.is_edge());
        assert_eq!(info.kind.code(), 3);

        let info = store.resolve_collection("nodes").unwrap().unwrap();
        assert_eq!(info.kind, CollectionKind::Document);

        assert!(store.resolve_collection("nope").unwrap().is_none());
    }

    #[test]
    fn test_create_collection_rules() {
        let store = store();
        // Same kind again is fine
        store
            .create_collection("nodes", CollectionKind::Document)
            .unwrap();

        match store.create_collection("nodes", CollectionKind::Edge) {
            Err(StoreError::WrongCollectionKind { name, expected }) => {
                assert_eq!(name, "nodes");
                assert_eq!(expected, "edge");
            }
            other => panic!("Expected WrongCollectionKind, got {:?}", other),
        }

        assert!(matches!(
            store.create_collection("", CollectionKind::Document),
            Err(StoreError::InvalidCollectionName { .. })
        ));
        assert!(matches!(
            store.create_collection("a/b", CollectionKind::Document),
            Err(StoreError::InvalidCollectionName { .. })
        ));
    }

    #[test]
    fn test_resolve_vertex() {
        let store = store();
        let vertex = store.resolve_vertex("nodes/b").unwrap().unwrap();
        assert_eq!(vertex.id(), "nodes/b");

        assert!(store.resolve_vertex("nodes/zzz").unwrap().is_none());
        assert!(store.resolve_vertex("missing/1").unwrap().is_none());
        assert!(store.resolve_vertex("unqualified").unwrap().is_none());
    }

    #[test]
    fn test_insert_vertex_validation() {
        let store = store();

        assert!(matches!(
            store.insert_vertex("nodes", Vertex::new("nodes/a")),
            Err(StoreError::DuplicateDocument { .. })
        ));
        assert!(matches!(
            store.insert_vertex("nodes", Vertex::new("other/a")),
            Err(StoreError::InvalidDocument { .. })
        ));
        assert!(matches!(
            store.insert_vertex("links", Vertex::new("links/a")),
            Err(StoreError::WrongCollectionKind { .. })
        ));
        assert!(matches!(
            store.insert_vertex("ghosts", Vertex::new("ghosts/a")),
            Err(StoreError::CollectionNotFound { .. })
        ));
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let store = store();
        store
            .insert_edge("links", Edge::new("links/2", "nodes/a", "nodes/c"))
            .unwrap();
        store
            .insert_edge("links", Edge::new("links/1", "nodes/a", "nodes/b"))
            .unwrap();
        store
            .insert_edge("links", Edge::new("links/3", "nodes/b", "nodes/c"))
            .unwrap();

        let out: Vec<String> = store
            .out_edges("links", "nodes/a")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(out, vec!["links/2", "links/1"]);

        let inbound: Vec<String> = store
            .edges("links", "nodes/c", Direction::Inbound)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(inbound, vec!["links/2", "links/3"]);

        assert!(store.out_edges("links", "nodes/c").unwrap().is_empty());
        assert_eq!(store.document_count().unwrap(), 6);
    }

    #[test]
    fn test_edge_lookup_on_document_collection_fails() {
        let store = store();
        assert!(matches!(
            store.out_edges("nodes", "nodes/a"),
            Err(StoreError::WrongCollectionKind { .. })
        ));
        assert!(matches!(
            store.in_edges("ghosts", "nodes/a"),
            Err(StoreError::CollectionNotFound { .. })
        ));
    }

    #[test]
    fn test_insert_edge_validation() {
        let store = store();
        store
            .insert_edge("links", Edge::new("links/1", "nodes/a", "nodes/b"))
            .unwrap();

        assert!(matches!(
            store.insert_edge("links", Edge::new("links/1", "nodes/b", "nodes/c")),
            Err(StoreError::DuplicateDocument { .. })
        ));
        assert!(matches!(
            store.insert_edge("links", Edge::new("links/2", "nodes/a", "")),
            Err(StoreError::InvalidDocument { .. })
        ));

        // Dangling endpoints are accepted at insert time
        store
            .insert_edge("links", Edge::new("links/3", "nodes/a", "nodes/gone"))
            .unwrap();
        let edge = store.out_edges("links", "nodes/a").unwrap().pop().unwrap();
        assert!(store
            .resolve_edge_endpoint(&edge, Direction::Outbound)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_clear() {
        let store = store();
        store.clear().unwrap();
        assert_eq!(store.collection_count().unwrap(), 0);
        assert!(store.resolve_vertex("nodes/a").unwrap().is_none());
    }
}
