//! Core data types for Arbor

pub mod collection;
pub mod document;

pub use collection::{CollectionInfo, CollectionKind};
pub use document::{split_id, Direction, DocumentId, Edge, Vertex};
