//! Root-to-current path maintained by the visitation strategies

use crate::types::{Edge, Vertex};
use std::fmt;

/// The route from the start vertex to the element being processed
///
/// Always holds `edges.len() + 1 == vertices.len()`. The path is a view
/// that strategies rewrite as they descend or backtrack, not a history.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl Path {
    /// Create a path consisting of the start vertex only
    pub fn new(start: Vertex) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
        }
    }

    /// Number of edges on the path (the depth of the last vertex)
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True when the path is just the start vertex
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> &Vertex {
        &self.vertices[0]
    }

    pub fn end(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    /// Ids of the vertices on the path, in order
    pub fn vertex_ids(&self) -> Vec<&str> {
        self.vertices.iter().map(|v| v.id()).collect()
    }

    /// Ids of the edges on the path, in order
    pub fn edge_ids(&self) -> Vec<&str> {
        self.edges.iter().map(|e| e.id()).collect()
    }

    /// Whether `id` names one of the first `depth` vertices
    pub(crate) fn has_vertex_above(&self, id: &str, depth: usize) -> bool {
        self.vertices.iter().take(depth).any(|v| v.id == id)
    }

    /// Whether `id` names one of the first `depth` edges
    pub(crate) fn has_edge_above(&self, id: &str, depth: usize) -> bool {
        self.edges.iter().take(depth).any(|e| e.id == id)
    }

    /// Make `vertex` (reached via `edge`) the element at `level`
    ///
    /// Everything deeper than `level` is dropped. Level 0 replaces the
    /// start vertex and carries no edge.
    pub(crate) fn set_level(&mut self, level: usize, edge: Option<&Edge>, vertex: &Vertex) {
        self.vertices.truncate(level);
        self.edges.truncate(level.saturating_sub(1));
        if let Some(edge) = edge {
            self.edges.push(edge.clone());
        }
        self.vertices.push(vertex.clone());
    }

    /// Drop the last vertex and the edge leading to it
    pub(crate) fn pop(&mut self) {
        if self.vertices.len() > 1 {
            self.vertices.pop();
            self.edges.pop();
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", vertex.id)?;
        }
        write!(f, "]")
    }
}
