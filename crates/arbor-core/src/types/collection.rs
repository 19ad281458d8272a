//! Collection descriptors
//!
//! The engine only needs to know whether a named collection exists and
//! whether it holds edges. Kind codes follow the ArangoDB collection types
//! (document = 2, edge = 3).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Kind of documents a collection stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Plain documents (vertices)
    Document,
    /// Edge documents with `_from` / `_to`
    Edge,
}

impl CollectionKind {
    /// Numeric type code
    pub fn code(&self) -> u8 {
        match self {
            CollectionKind::Document => 2,
            CollectionKind::Edge => 3,
        }
    }
}

impl TryFrom<u8> for CollectionKind {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            2 => Ok(CollectionKind::Document),
            3 => Ok(CollectionKind::Edge),
            other => Err(ConfigError::InvalidParameter {
                name: "collection_kind",
                message: format!("unknown collection type code {}", other),
            }),
        }
    }
}

/// Resolved collection handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub kind: CollectionKind,
}

impl CollectionInfo {
    pub fn new(name: impl Into<String>, kind: CollectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_edge(&self) -> bool {
        self.kind == CollectionKind::Edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(CollectionKind::Document.code(), 2);
        assert_eq!(CollectionKind::Edge.code(), 3);
        assert_eq!(CollectionKind::try_from(3).unwrap(), CollectionKind::Edge);
        assert!(CollectionKind::try_from(7).is_err());
    }

    #[test]
    fn test_is_edge() {
        assert!(CollectionInfo::new("rel", CollectionKind::Edge).is_edge());
        assert!(!CollectionInfo::new("users", CollectionKind::Document).is_edge());
    }
}
