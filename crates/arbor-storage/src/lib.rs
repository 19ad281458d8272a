//! Arbor Storage Implementations
//!
//! This crate provides concrete implementations of the `GraphStore` trait
//! from arbor-core.
//!
//! # Available Backends
//!
//! - `MemStore`: In-memory collections (for embedding, tests and the CLI)
//!
//! `Snapshot` is the JSON interchange format a `MemStore` can be loaded
//! from and exported to.

pub mod mem;
pub mod snapshot;

// Re-export the trait from arbor-core
pub use arbor_core::{GraphStore, StoreError, StoreResult};

// Re-export implementations
pub use mem::MemStore;
pub use snapshot::{CollectionSnapshot, Snapshot};
