//! Discovered edge + neighbor pairs

use crate::types::{Edge, Vertex};

/// One entry of the level stack
///
/// `parent_index` points into the previous level's connection list. It is
/// the only ancestry link; paths are rebuilt by following it upwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Edge that led here; `None` only for the root at level 0
    pub edge: Option<Edge>,
    pub vertex: Vertex,
    pub parent_index: usize,
    /// Set on entry when the vertex passed uniqueness and the filter
    /// asked for a visit. Post-order strategies read it on leave.
    pub(crate) pending_visit: bool,
}

impl Connection {
    /// Connection produced by an expander
    pub fn new(edge: Edge, vertex: Vertex) -> Self {
        Self {
            edge: Some(edge),
            vertex,
            parent_index: 0,
            pending_visit: false,
        }
    }

    /// Synthetic root connection for the start vertex
    pub fn root(vertex: Vertex) -> Self {
        Self {
            edge: None,
            vertex,
            parent_index: 0,
            pending_visit: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.edge.is_none()
    }

    pub fn vertex_id(&self) -> &str {
        self.vertex.id()
    }

    pub fn edge_id(&self) -> Option<&str> {
        self.edge.as_ref().map(|e| e.id())
    }
}
