//! Core error types for Arbor
//!
//! All errors are explicit - no silent failures allowed. Every error aborts
//! the running traversal and propagates to the caller; the engine never
//! retries.
//!
//! # Error Code Scheme
//!
//! | Range | Category |
//! |-------|----------|
//! | 10xxx | Storage errors |
//! | 40xxx | Configuration errors |
//! | 50xxx | Internal/Runtime errors |
//! | 60xxx | Data integrity errors |

use thiserror::Error;

/// Dangling edge: the endpoint vertex of an expanded edge does not resolve
pub const CODE_DANGLING_EDGE: u32 = 60001;

/// The strategy was asked for an element after the level stack was exhausted
pub const CODE_STACK_EXHAUSTED: u32 = 50001;

/// Top-level error type for traversal operations
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("Storage error: {0}")]
    Store(#[from] crate::storage::StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("Vertex not found: {id}")]
    VertexNotFound { id: String },

    /// An edge references a vertex that cannot be resolved
    ///
    /// Error codes in range 60xxx.
    #[error("Data integrity [{code}]: edge {edge_id} references missing vertex {vertex_id}")]
    DataIntegrity {
        code: u32,
        edge_id: String,
        vertex_id: String,
    },

    /// Error raised by a user-supplied visitor, filter or expander
    #[error("Callback error: {message}")]
    Callback { message: String },

    /// Internal error - invariant violations of the traversal state
    ///
    /// These errors indicate bugs, not user errors.
    /// Error codes in range 50xxx.
    #[error("Internal error [{code}]: {message}")]
    Internal {
        /// Error code (50xxx range)
        code: u32,
        /// Human-readable description
        message: String,
    },
}

impl TraversalError {
    /// Convenience constructor for callback failures
    pub fn callback(message: impl Into<String>) -> Self {
        TraversalError::Callback {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the not-found class
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TraversalError::CollectionNotFound { .. } | TraversalError::VertexNotFound { .. }
        )
    }
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: &'static str },
}

/// Convenience type alias for traversal results
pub type TraversalResult<T> = Result<T, TraversalError>;
