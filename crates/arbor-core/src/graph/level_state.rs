//! Level stack: the traversal's working memory
//!
//! `stack[0]` holds the root connection. `stack[L]` holds every connection
//! discovered by expanding an accepted vertex at level `L - 1`, in
//! discovery order. The stack doubles as the arena that `parent_index`
//! points into.

use super::connection::Connection;
use super::path::Path;
use crate::types::Vertex;

/// Position of an element in the level stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub level: usize,
    pub index: usize,
}

/// Mutable state shared by all visitation strategies
#[derive(Debug)]
pub struct LevelState {
    /// Current depth
    pub level: usize,
    /// Deepest level holding undiscarded connections
    pub max_level: usize,
    /// Flat cursor within the current level (breadth-first only)
    pub index: usize,
    /// Per-level cursors (depth-first only)
    pub positions: Vec<usize>,
    pub stack: Vec<Vec<Connection>>,
    /// Root-to-current view
    pub path: Path,
}

impl LevelState {
    /// Seed the stack with the start vertex
    pub fn new(start: Vertex) -> Self {
        Self {
            level: 0,
            max_level: 0,
            index: 0,
            positions: vec![0],
            stack: vec![vec![Connection::root(start.clone())]],
            path: Path::new(start),
        }
    }

    pub fn element_at(&self, cursor: Cursor) -> Option<&Connection> {
        self.stack.get(cursor.level)?.get(cursor.index)
    }

    pub(crate) fn element_at_mut(&mut self, cursor: Cursor) -> Option<&mut Connection> {
        self.stack.get_mut(cursor.level)?.get_mut(cursor.index)
    }

    /// Number of connections at `level`
    pub fn num_elements(&self, level: usize) -> usize {
        self.stack.get(level).map_or(0, Vec::len)
    }

    /// Whether the level below the current one has connections to enter
    pub fn can_descend(&self) -> bool {
        self.level < self.max_level && self.num_elements(self.level + 1) > 0
    }

    /// Append the expansion of the element at `parent` to the next level
    pub fn push_children(&mut self, parent: Cursor, children: Vec<Connection>) {
        if children.is_empty() {
            return;
        }

        let next = parent.level + 1;
        while self.stack.len() <= next {
            self.stack.push(Vec::new());
        }
        while self.positions.len() <= next {
            self.positions.push(0);
        }

        if self.stack[next].is_empty() {
            self.max_level += 1;
        }

        self.stack[next].extend(children.into_iter().map(|mut child| {
            child.parent_index = parent.index;
            child.pending_visit = false;
            child
        }));
    }

    /// Discard the current level and step up to its parent
    ///
    /// Returns false when already at level 0.
    pub(crate) fn discard_level(&mut self) -> bool {
        if self.level == 0 {
            return false;
        }
        self.stack.truncate(self.level);
        self.positions.truncate(self.level);
        self.level -= 1;
        self.max_level = self.max_level.saturating_sub(1).max(self.level);
        self.path.pop();
        true
    }

    /// Point the path at the element under the current depth-first cursor
    pub(crate) fn sync_path(&mut self) {
        let level = self.level;
        let position = self.positions[level];
        let connection = &self.stack[level][position];
        self.path
            .set_level(level, connection.edge.as_ref(), &connection.vertex);
    }

    /// Rebuild the whole path for `cursor` by following parent links
    pub(crate) fn rebuild_path(&mut self, cursor: Cursor) {
        let mut vertices = Vec::with_capacity(cursor.level + 1);
        let mut edges = Vec::with_capacity(cursor.level);
        let mut index = cursor.index;

        for level in (0..=cursor.level).rev() {
            let connection = &self.stack[level][index];
            vertices.push(connection.vertex.clone());
            if let Some(edge) = &connection.edge {
                edges.push(edge.clone());
            }
            index = connection.parent_index;
        }

        vertices.reverse();
        edges.reverse();
        self.path = Path { vertices, edges };
    }
}
