//! Store with configurable failure injection

use arbor_core::{CollectionInfo, Edge, GraphStore, StoreError, StoreResult, Vertex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Store that delegates to another store but can inject failures
///
/// Set `*_fail_at` to a call count to trigger an I/O error on that call and
/// every later one. Set to 0 to disable failure (default). Use
/// `clear_failures()` to reset.
pub struct FailingStore<G> {
    inner: G,
    /// Fail resolve_collection on this call number (0 = never)
    pub resolve_collection_fail_at: Arc<AtomicU64>,
    /// Fail resolve_vertex on this call number (0 = never)
    pub resolve_vertex_fail_at: Arc<AtomicU64>,
    /// Fail out_edges / in_edges on this call number (0 = never)
    pub edges_fail_at: Arc<AtomicU64>,
    resolve_collection_count: Arc<AtomicU64>,
    resolve_vertex_count: Arc<AtomicU64>,
    edges_count: Arc<AtomicU64>,
}

impl<G: GraphStore> FailingStore<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            resolve_collection_fail_at: Arc::new(AtomicU64::new(0)),
            resolve_vertex_fail_at: Arc::new(AtomicU64::new(0)),
            edges_fail_at: Arc::new(AtomicU64::new(0)),
            resolve_collection_count: Arc::new(AtomicU64::new(0)),
            resolve_vertex_count: Arc::new(AtomicU64::new(0)),
            edges_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn clear_failures(&self) {
        self.resolve_collection_fail_at.store(0, Ordering::SeqCst);
        self.resolve_vertex_fail_at.store(0, Ordering::SeqCst);
        self.edges_fail_at.store(0, Ordering::SeqCst);
    }

    /// Number of edge lookups made so far
    pub fn edge_calls(&self) -> u64 {
        self.edges_count.load(Ordering::SeqCst)
    }

    fn should_fail(counter: &AtomicU64, fail_at: &AtomicU64) -> bool {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        let target = fail_at.load(Ordering::SeqCst);
        target != 0 && count >= target
    }
}

impl<G: GraphStore> GraphStore for FailingStore<G> {
    fn resolve_collection(&self, name: &str) -> StoreResult<Option<CollectionInfo>> {
        if Self::should_fail(
            &self.resolve_collection_count,
            &self.resolve_collection_fail_at,
        ) {
            return Err(StoreError::Io {
                message: "Injected resolve_collection failure".into(),
            });
        }
        self.inner.resolve_collection(name)
    }

    fn resolve_vertex(&self, id: &str) -> StoreResult<Option<Vertex>> {
        if Self::should_fail(&self.resolve_vertex_count, &self.resolve_vertex_fail_at) {
            return Err(StoreError::Io {
                message: "Injected resolve_vertex failure".into(),
            });
        }
        self.inner.resolve_vertex(id)
    }

    fn out_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        if Self::should_fail(&self.edges_count, &self.edges_fail_at) {
            return Err(StoreError::Io {
                message: "Injected out_edges failure".into(),
            });
        }
        self.inner.out_edges(collection, vertex_id)
    }

    fn in_edges(&self, collection: &str, vertex_id: &str) -> StoreResult<Vec<Edge>> {
        if Self::should_fail(&self.edges_count, &self.edges_fail_at) {
            return Err(StoreError::Io {
                message: "Injected in_edges failure".into(),
            });
        }
        self.inner.in_edges(collection, vertex_id)
    }
}
