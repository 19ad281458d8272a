//! JSON snapshots of a store
//!
//! ```json
//! {
//!   "collections": [
//!     { "name": "nodes", "kind": "document", "documents": [{ "_id": "nodes/a" }] },
//!     { "name": "links", "kind": "edge",
//!       "documents": [{ "_id": "links/1", "_from": "nodes/a", "_to": "nodes/b" }] }
//!   ]
//! }
//! ```
//!
//! All collections are created before any document is inserted, so the
//! order of collections in the file does not matter.

use crate::mem::MemStore;
use arbor_core::{CollectionKind, Edge, StoreError, StoreResult, Vertex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// Serialized store contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub collections: Vec<CollectionSnapshot>,
}

/// One collection with its raw documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub name: String,
    pub kind: CollectionKind,
    #[serde(default)]
    pub documents: Vec<Value>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON reader
    pub fn from_reader(reader: impl Read) -> StoreResult<Self> {
        serde_json::from_reader(reader).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })
    }

    pub fn to_json_pretty(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization {
            message: e.to_string(),
        })
    }
}

impl MemStore {
    /// Build a store from a snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> StoreResult<Self> {
        let store = MemStore::new();
        for collection in &snapshot.collections {
            store.create_collection(&collection.name, collection.kind)?;
        }

        for collection in &snapshot.collections {
            for document in &collection.documents {
                match collection.kind {
                    CollectionKind::Document => {
                        let vertex: Vertex = decode(document)?;
                        store.insert_vertex(&collection.name, vertex)?;
                    }
                    CollectionKind::Edge => {
                        let edge: Edge = decode(document)?;
                        store.insert_edge(&collection.name, edge)?;
                    }
                }
            }
        }

        tracing::info!(
            collections = snapshot.collections.len(),
            documents = store.document_count()?,
            "Loaded snapshot"
        );
        Ok(store)
    }

    /// Build a store from snapshot JSON
    pub fn load_json(reader: impl Read) -> StoreResult<Self> {
        Self::from_snapshot(&Snapshot::from_reader(reader)?)
    }

    /// Export the current contents
    ///
    /// Collections and vertices are sorted by name and id; edges keep their
    /// insertion order so adjacency order survives a round trip.
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        let mut collections = Vec::new();
        for info in self.collections()? {
            let documents = match info.kind {
                CollectionKind::Document => encode_all(self.vertices(&info.name)?)?,
                CollectionKind::Edge => encode_all(self.all_edges(&info.name)?)?,
            };
            collections.push(CollectionSnapshot {
                name: info.name,
                kind: info.kind,
                documents,
            });
        }
        Ok(Snapshot { collections })
    }
}

fn decode<T: serde::de::DeserializeOwned>(document: &Value) -> StoreResult<T> {
    serde_json::from_value(document.clone()).map_err(|e| StoreError::Serialization {
        message: format!("{} in document {}", e, document),
    })
}

fn encode_all<T: Serialize>(documents: Vec<T>) -> StoreResult<Vec<Value>> {
    documents
        .iter()
        .map(|d| {
            serde_json::to_value(d).map_err(|e| StoreError::Serialization {
                message: e.to_string(),
            })
        })
        .collect()
}
