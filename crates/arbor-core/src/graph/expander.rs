//! Default expander and filter policies
//!
//! Expanders turn a vertex into the ordered list of its connections. The
//! defaults ask the store for adjacent edges in the traverser's edge
//! collection and resolve each edge's far endpoint, keeping the store's
//! edge order.

use super::connection::Connection;
use super::directive::FilterDirective;
use super::path::Path;
use super::traverser::Traverser;
use crate::error::{TraversalError, TraversalResult, CODE_DANGLING_EDGE};
use crate::storage::GraphStore;
use crate::types::{Direction, Vertex};

/// Connections of `vertex` in `direction` through the traverser's edge collection
///
/// A dangling edge (endpoint vertex missing) aborts with `DataIntegrity`.
pub fn expand<G: GraphStore, C, S>(
    traverser: &Traverser<G, C, S>,
    vertex: &Vertex,
    direction: Direction,
) -> TraversalResult<Vec<Connection>> {
    let store = traverser.store();
    let collection = &traverser.edge_collection().name;
    let edges = store.edges(collection, vertex.id(), direction)?;

    let mut connections = Vec::with_capacity(edges.len());
    for edge in edges {
        match store.resolve_edge_endpoint(&edge, direction)? {
            Some(neighbor) => connections.push(Connection::new(edge, neighbor)),
            None => {
                let vertex_id = edge.endpoint(direction).to_string();
                tracing::warn!(
                    edge = %edge.id,
                    vertex = %vertex_id,
                    collection = %collection,
                    "Dangling edge during expansion"
                );
                return Err(TraversalError::DataIntegrity {
                    code: CODE_DANGLING_EDGE,
                    edge_id: edge.id,
                    vertex_id,
                });
            }
        }
    }

    Ok(connections)
}

/// Follows edges from `_from` to `_to`
pub fn outbound_expander<G: GraphStore, C, S>(
    traverser: &Traverser<G, C, S>,
    vertex: &Vertex,
    _path: &Path,
    _context: &C,
    _state: &mut S,
) -> TraversalResult<Vec<Connection>> {
    expand(traverser, vertex, Direction::Outbound)
}

/// Follows edges from `_to` back to `_from`
pub fn inbound_expander<G: GraphStore, C, S>(
    traverser: &Traverser<G, C, S>,
    vertex: &Vertex,
    _path: &Path,
    _context: &C,
    _state: &mut S,
) -> TraversalResult<Vec<Connection>> {
    expand(traverser, vertex, Direction::Inbound)
}

/// Follows edges in the direction the traverser was built with
pub fn direction_expander<G: GraphStore, C, S>(
    traverser: &Traverser<G, C, S>,
    vertex: &Vertex,
    _path: &Path,
    _context: &C,
    _state: &mut S,
) -> TraversalResult<Vec<Connection>> {
    expand(traverser, vertex, traverser.direction())
}

/// Includes every vertex and continues through it
pub fn include_all_filter<G, C, S>(
    _traverser: &Traverser<G, C, S>,
    _vertex: &Vertex,
    _path: &Path,
    _context: &C,
    _state: &mut S,
) -> FilterDirective {
    FilterDirective::IncludeAndContinue
}
