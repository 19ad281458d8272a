//! Vertex and Edge documents
//!
//! Both are opaque records owned by the storage collaborator. The engine
//! only reads the system attributes (`_id`, `_from`, `_to`) and clones
//! documents into its transient level stack for the duration of a run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document identifier in `collection/key` form
pub type DocumentId = String;

/// Direction in which edges are followed from a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow edges whose `_from` is the vertex (towards `_to`)
    #[default]
    Outbound,
    /// Follow edges whose `_to` is the vertex (towards `_from`)
    Inbound,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Inbound => "inbound",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outbound" | "out" => Ok(Direction::Outbound),
            "inbound" | "in" => Ok(Direction::Inbound),
            other => Err(crate::error::ConfigError::InvalidParameter {
                name: "direction",
                message: format!("unknown direction '{}'", other),
            }),
        }
    }
}

/// A vertex document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier (`collection/key`)
    #[serde(rename = "_id")]
    pub id: DocumentId,

    /// User attributes
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Vertex {
    /// Create a vertex without attributes
    pub fn new(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            data: Map::new(),
        }
    }

    /// Add an attribute
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Collection part of the id, if the id is qualified
    pub fn collection(&self) -> Option<&str> {
        split_id(&self.id).map(|(collection, _)| collection)
    }

    /// Key part of the id (the whole id when unqualified)
    pub fn key(&self) -> &str {
        split_id(&self.id).map_or(self.id.as_str(), |(_, key)| key)
    }

    /// Look up a user attribute
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// An edge document connecting two vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "_id")]
    pub id: DocumentId,

    /// Source vertex id
    #[serde(rename = "_from")]
    pub from: DocumentId,

    /// Target vertex id
    #[serde(rename = "_to")]
    pub to: DocumentId,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Edge {
    pub fn new(
        id: impl Into<DocumentId>,
        from: impl Into<DocumentId>,
        to: impl Into<DocumentId>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            data: Map::new(),
        }
    }

    /// Add an attribute
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The vertex id reached when following this edge in `direction`
    pub fn endpoint(&self, direction: Direction) -> &str {
        match direction {
            Direction::Outbound => &self.to,
            Direction::Inbound => &self.from,
        }
    }

    pub fn collection(&self) -> Option<&str> {
        split_id(&self.id).map(|(collection, _)| collection)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }
}

/// Split `collection/key` into its parts
pub fn split_id(id: &str) -> Option<(&str, &str)> {
    id.split_once('/')
        .filter(|(collection, key)| !collection.is_empty() && !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vertex_id_parts() {
        let vertex = Vertex::new("tusers/claudius");
        assert_eq!(vertex.collection(), Some("tusers"));
        assert_eq!(vertex.key(), "claudius");

        let bare = Vertex::new("claudius");
        assert_eq!(bare.collection(), None);
        assert_eq!(bare.key(), "claudius");
    }

    #[test]
    fn test_edge_endpoint() {
        let edge = Edge::new("rel/1", "users/a", "users/b");
        assert_eq!(edge.endpoint(Direction::Outbound), "users/b");
        assert_eq!(edge.endpoint(Direction::Inbound), "users/a");
    }

    #[test]
    fn test_system_attributes_serialize() {
        let edge = Edge::new("rel/1", "users/a", "users/b").with_field("what", "brother");
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(
            value,
            json!({ "_id": "rel/1", "_from": "users/a", "_to": "users/b", "what": "brother" })
        );

        let vertex: Vertex = serde_json::from_value(json!({ "_id": "users/a", "age": 41 })).unwrap();
        assert_eq!(vertex.id(), "users/a");
        assert_eq!(vertex.get("age"), Some(&json!(41)));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("OUTBOUND".parse::<Direction>().unwrap(), Direction::Outbound);
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::Inbound);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
