//! Recording visitor
//!
//! `Recording` is a traversal state value that captures every visitor call
//! together with the path at that moment.

use arbor_core::{
    GraphStore, Path, TraversalResult, Traverser, TraverserBuilder, Vertex, VisitControl,
};

/// One visitor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub vertex: String,
    pub path_vertices: Vec<String>,
    pub path_edges: Vec<String>,
}

/// Visits observed during a run
#[derive(Debug, Default, Clone)]
pub struct Recording {
    pub visits: Vec<Visit>,
    /// Halt the run once this many visits were recorded
    pub limit: Option<usize>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            visits: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Visited vertex ids in visit order
    pub fn vertex_ids(&self) -> Vec<&str> {
        self.visits.iter().map(|v| v.vertex.as_str()).collect()
    }

    /// Visited vertex keys (id without collection) in visit order
    pub fn keys(&self) -> Vec<&str> {
        self.visits
            .iter()
            .map(|v| v.vertex.split_once('/').map_or(v.vertex.as_str(), |(_, k)| k))
            .collect()
    }

    /// Depth (edge count of the path) of each visit
    pub fn depths(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.path_edges.len()).collect()
    }
}

/// Visitor that appends to a `Recording` state
pub fn record_visit<G: GraphStore>(
    _traverser: &Traverser<G, (), Recording>,
    vertex: &Vertex,
    path: &Path,
    _context: &(),
    recording: &mut Recording,
) -> TraversalResult<VisitControl> {
    recording.visits.push(Visit {
        vertex: vertex.id.clone(),
        path_vertices: path.vertex_ids().into_iter().map(String::from).collect(),
        path_edges: path.edge_ids().into_iter().map(String::from).collect(),
    });

    match recording.limit {
        Some(limit) if recording.visits.len() >= limit => Ok(VisitControl::Halt),
        _ => Ok(VisitControl::Continue),
    }
}

/// Builder preloaded with `record_visit`
pub fn recording_traverser<G: GraphStore + Send + Sync + 'static>(
    store: G,
    edge_collection: &str,
) -> TraverserBuilder<G, (), Recording> {
    TraverserBuilder::new(store, edge_collection).visitor(record_visit::<G>)
}
