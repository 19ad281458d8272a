//! Uniqueness policies and the per-run tracker

use super::connection::Connection;
use super::path::Path;
use crate::error::ConfigError;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scope at which a repeated vertex or edge id is suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessPolicy {
    /// Repeats always allowed (cyclic graphs may walk forever)
    #[default]
    None,
    /// Suppressed while the id is on the active path
    Path,
    /// Suppressed once the id was accepted anywhere in the run
    Global,
}

impl UniquenessPolicy {
    pub fn code(&self) -> u8 {
        match self {
            UniquenessPolicy::None => 0,
            UniquenessPolicy::Path => 1,
            UniquenessPolicy::Global => 2,
        }
    }
}

impl TryFrom<u8> for UniquenessPolicy {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UniquenessPolicy::None),
            1 => Ok(UniquenessPolicy::Path),
            2 => Ok(UniquenessPolicy::Global),
            other => Err(ConfigError::InvalidParameter {
                name: "uniqueness",
                message: format!("unknown uniqueness code {}", other),
            }),
        }
    }
}

impl FromStr for UniquenessPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(UniquenessPolicy::None),
            "path" => Ok(UniquenessPolicy::Path),
            "global" => Ok(UniquenessPolicy::Global),
            other => Err(ConfigError::InvalidParameter {
                name: "uniqueness",
                message: format!("unknown uniqueness policy '{}'", other),
            }),
        }
    }
}

/// Uniqueness policy per dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Uniqueness {
    pub vertices: UniquenessPolicy,
    pub edges: UniquenessPolicy,
}

impl Uniqueness {
    pub fn new(vertices: UniquenessPolicy, edges: UniquenessPolicy) -> Self {
        Self { vertices, edges }
    }

    /// No repeat suppression at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Each vertex accepted at most once per run, edges unrestricted
    pub fn global_vertices() -> Self {
        Self::new(UniquenessPolicy::Global, UniquenessPolicy::None)
    }

    /// Vertices may not repeat on one path (cycle-safe, not dedup'ing)
    pub fn path_vertices() -> Self {
        Self::new(UniquenessPolicy::Path, UniquenessPolicy::None)
    }
}

/// Visited-id bookkeeping for one traversal run
#[derive(Debug, Default)]
pub struct UniquenessTracker {
    policy: Uniqueness,
    vertices: FxHashSet<String>,
    edges: FxHashSet<String>,
}

impl UniquenessTracker {
    pub fn new(policy: Uniqueness) -> Self {
        Self {
            policy,
            vertices: FxHashSet::default(),
            edges: FxHashSet::default(),
        }
    }

    pub fn policy(&self) -> Uniqueness {
        self.policy
    }

    /// Decide whether `connection` at `level` may be entered
    ///
    /// `path` must end at the connection itself, so only the first `level`
    /// vertices (and `level - 1` edges) are its ancestors. Ids are marked on
    /// acceptance only.
    pub fn admit(&mut self, connection: &Connection, path: &Path, level: usize) -> bool {
        let vertex_id = connection.vertex_id();
        let vertex_ok = match self.policy.vertices {
            UniquenessPolicy::None => true,
            UniquenessPolicy::Path => !path.has_vertex_above(vertex_id, level),
            UniquenessPolicy::Global => !self.vertices.contains(vertex_id),
        };

        let edge_ok = match connection.edge_id() {
            None => true,
            Some(edge_id) => match self.policy.edges {
                UniquenessPolicy::None => true,
                UniquenessPolicy::Path => {
                    !path.has_edge_above(edge_id, level.saturating_sub(1))
                }
                UniquenessPolicy::Global => !self.edges.contains(edge_id),
            },
        };

        if !(vertex_ok && edge_ok) {
            return false;
        }

        if self.policy.vertices == UniquenessPolicy::Global {
            self.vertices.insert(vertex_id.to_string());
        }
        if let (UniquenessPolicy::Global, Some(edge_id)) = (self.policy.edges, connection.edge_id())
        {
            self.edges.insert(edge_id.to_string());
        }

        true
    }

    /// Number of distinct vertex ids marked so far (GLOBAL only)
    pub fn vertices_seen(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges_seen(&self) -> usize {
        self.edges.len()
    }
}
