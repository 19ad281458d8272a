//! Traverser: configuration, validation and the main traversal loop
//!
//! A `Traverser` is built once per edge collection and callback set and can
//! run any number of independent traversals. All per-run state (level
//! stack, path, uniqueness tracker) lives on the stack of `traverse`.
//!
//! # Callbacks
//!
//! Every callback receives the traverser itself (giving access to the store
//! and edge collection), the vertex, the current path, and the caller's
//! context and state values, which the engine passes through untouched.
//!
//! ```ignore
//! let traverser = TraverserBuilder::new(&store, "relations")
//!     .visitor(|_, vertex, path, _: &(), seen: &mut Vec<String>| {
//!         seen.push(format!("{} {}", path.len(), vertex.id()));
//!         Ok(VisitControl::Continue)
//!     })
//!     .build()?;
//!
//! let mut seen = Vec::new();
//! traverser.traverse("users/claudius", StrategyKind::DepthFirstPre, Uniqueness::global_vertices(), &(), &mut seen)?;
//! ```

use super::connection::Connection;
use super::directive::{FilterDirective, VisitControl, VisitOrder};
use super::expander::{direction_expander, include_all_filter};
use super::level_state::{Cursor, LevelState};
use super::path::Path;
use super::strategy::StrategyKind;
use super::uniqueness::{Uniqueness, UniquenessTracker};
use crate::config::TraversalOptions;
use crate::error::{ConfigError, TraversalError, TraversalResult, CODE_STACK_EXHAUSTED};
use crate::storage::GraphStore;
use crate::types::{CollectionInfo, Direction, Vertex};
use tracing::{debug, trace};

/// Visitor callback: observes an included vertex
pub type VisitorFn<G, C, S> = dyn Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> TraversalResult<VisitControl>
    + Send
    + Sync;

/// Filter callback: decides inclusion and continuation for a vertex
pub type FilterFn<G, C, S> =
    dyn Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> FilterDirective + Send + Sync;

/// Expander callback: produces the ordered connections of a vertex
pub type ExpanderFn<G, C, S> = dyn Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> TraversalResult<Vec<Connection>>
    + Send
    + Sync;

/// Where a traversal starts
#[derive(Debug, Clone, PartialEq)]
pub enum StartVertex {
    /// Resolved through the store
    Id(String),
    /// Already fetched by the caller
    Record(Vertex),
    /// No start vertex supplied
    Missing,
}

impl From<&str> for StartVertex {
    fn from(id: &str) -> Self {
        StartVertex::Id(id.to_string())
    }
}

impl From<String> for StartVertex {
    fn from(id: String) -> Self {
        StartVertex::Id(id)
    }
}

impl From<Vertex> for StartVertex {
    fn from(vertex: Vertex) -> Self {
        StartVertex::Record(vertex)
    }
}

impl<T: Into<StartVertex>> From<Option<T>> for StartVertex {
    fn from(start: Option<T>) -> Self {
        start.map_or(StartVertex::Missing, Into::into)
    }
}

/// Filter in effect for a traverser
enum FilterPolicy<G, C, S> {
    IncludeAll,
    Custom(Box<FilterFn<G, C, S>>),
}

/// Expander in effect for a traverser
enum ExpanderPolicy<G, C, S> {
    /// Follow the traverser's direction through its edge collection
    Adjacent,
    Custom(Box<ExpanderFn<G, C, S>>),
}

/// Counters for one run, reported through tracing
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    entered: usize,
    visited: usize,
    expanded: usize,
    duplicates: usize,
}

/// Graph traverser bound to one edge collection and one callback set
pub struct Traverser<G, C = (), S = ()> {
    store: G,
    edge_collection: CollectionInfo,
    direction: Direction,
    visitor: Box<VisitorFn<G, C, S>>,
    filter: FilterPolicy<G, C, S>,
    expander: ExpanderPolicy<G, C, S>,
}

impl<G, C, S> std::fmt::Debug for Traverser<G, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traverser")
            .field("edge_collection", &self.edge_collection)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl<G: GraphStore, C, S> Traverser<G, C, S> {
    /// Start building a traverser over `edge_collection` in `store`
    pub fn builder(store: G, edge_collection: impl Into<String>) -> TraverserBuilder<G, C, S> {
        TraverserBuilder::new(store, edge_collection)
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    pub fn edge_collection(&self) -> &CollectionInfo {
        &self.edge_collection
    }

    /// Direction used by the default expander
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Run a traversal with options from the configuration layer
    ///
    /// The expansion direction is fixed when the traverser is built, so
    /// `options.direction` must match it.
    pub fn run(
        &self,
        start: impl Into<StartVertex>,
        options: &TraversalOptions,
        context: &C,
        state: &mut S,
    ) -> TraversalResult<()> {
        if options.direction != self.direction {
            return Err(ConfigError::InvalidParameter {
                name: "direction",
                message: format!(
                    "traverser follows {} edges, options ask for {}",
                    self.direction.as_str(),
                    options.direction.as_str()
                ),
            }
            .into());
        }
        self.traverse(start, options.strategy, options.uniqueness, context, state)
    }

    /// Walk the graph from `start`
    ///
    /// Output happens only through the visitor. Errors from the store or
    /// any callback abort the run; visits made before that stand.
    pub fn traverse(
        &self,
        start: impl Into<StartVertex>,
        strategy: StrategyKind,
        uniqueness: Uniqueness,
        context: &C,
        state: &mut S,
    ) -> TraversalResult<()> {
        let start = self.resolve_start(start.into())?;
        debug!(
            start = %start.id,
            strategy = strategy.as_str(),
            vertex_uniqueness = ?uniqueness.vertices,
            edge_uniqueness = ?uniqueness.edges,
            collection = %self.edge_collection.name,
            "Starting traversal"
        );

        let walker = strategy.strategy();
        let order = strategy.order();
        let mut levels = LevelState::new(start);
        let mut tracker = UniquenessTracker::new(uniqueness);
        let mut stats = RunStats::default();

        loop {
            let cursor = walker.current_element(&mut levels).ok_or_else(|| {
                TraversalError::Internal {
                    code: CODE_STACK_EXHAUSTED,
                    message: format!(
                        "no current element at level {} (max level {})",
                        levels.level, levels.max_level
                    ),
                }
            })?;

            if !self.enter(&mut levels, cursor, order, &mut tracker, context, state, &mut stats)? {
                debug!("Traversal halted by visitor");
                break;
            }

            let mut leave = |levels: &LevelState, cursor: Cursor| -> TraversalResult<bool> {
                self.leave(levels, cursor, context, state, &mut stats)
            };
            if !walker.advance(&mut levels, &mut leave)? {
                break;
            }
        }

        debug!(
            entered = stats.entered,
            visited = stats.visited,
            expanded = stats.expanded,
            duplicates = stats.duplicates,
            "Traversal complete"
        );
        Ok(())
    }

    fn resolve_start(&self, start: StartVertex) -> TraversalResult<Vertex> {
        match start {
            StartVertex::Missing => Err(ConfigError::MissingParameter {
                name: "start_vertex",
            }
            .into()),
            StartVertex::Id(id) if id.is_empty() => Err(ConfigError::MissingParameter {
                name: "start_vertex",
            }
            .into()),
            StartVertex::Id(id) => self
                .store
                .resolve_vertex(&id)?
                .ok_or_else(|| TraversalError::VertexNotFound { id }),
            StartVertex::Record(vertex) if vertex.id.is_empty() => {
                Err(ConfigError::InvalidParameter {
                    name: "start_vertex",
                    message: "vertex record has an empty id".into(),
                }
                .into())
            }
            StartVertex::Record(vertex) => Ok(vertex),
        }
    }

    /// Uniqueness, filter, pre-order visit and expansion for one element
    ///
    /// Returns false when the visitor halted the run.
    #[allow(clippy::too_many_arguments)]
    fn enter(
        &self,
        levels: &mut LevelState,
        cursor: Cursor,
        order: VisitOrder,
        tracker: &mut UniquenessTracker,
        context: &C,
        state: &mut S,
        stats: &mut RunStats,
    ) -> TraversalResult<bool> {
        let connection = levels.element_at(cursor).ok_or_else(|| exhausted(cursor))?;
        stats.entered += 1;

        if !tracker.admit(connection, &levels.path, cursor.level) {
            stats.duplicates += 1;
            trace!(
                vertex = %connection.vertex.id,
                level = cursor.level,
                "Skipping repeated element"
            );
            return Ok(true);
        }

        let vertex = &connection.vertex;
        let directive = match &self.filter {
            FilterPolicy::IncludeAll => {
                include_all_filter(self, vertex, &levels.path, context, state)
            }
            FilterPolicy::Custom(filter) => filter(self, vertex, &levels.path, context, state),
        };
        trace!(vertex = %vertex.id, level = cursor.level, ?directive, "Entered");

        let mut pending_visit = false;
        if directive.includes() {
            match order {
                VisitOrder::PreOrder => {
                    if !self.visit(vertex, &levels.path, context, state, stats)? {
                        return Ok(false);
                    }
                }
                VisitOrder::PostOrder => pending_visit = true,
            }
        }

        let children = if directive.continues() {
            Some(match &self.expander {
                ExpanderPolicy::Adjacent => {
                    direction_expander(self, vertex, &levels.path, context, state)?
                }
                ExpanderPolicy::Custom(expander) => {
                    expander(self, vertex, &levels.path, context, state)?
                }
            })
        } else {
            None
        };

        if pending_visit {
            if let Some(connection) = levels.element_at_mut(cursor) {
                connection.pending_visit = true;
            }
        }
        if let Some(children) = children {
            stats.expanded += 1;
            levels.push_children(cursor, children);
        }

        Ok(true)
    }

    /// Post-order visit of an element the strategy has finished
    fn leave(
        &self,
        levels: &LevelState,
        cursor: Cursor,
        context: &C,
        state: &mut S,
        stats: &mut RunStats,
    ) -> TraversalResult<bool> {
        let connection = levels.element_at(cursor).ok_or_else(|| exhausted(cursor))?;
        if !connection.pending_visit {
            return Ok(true);
        }
        self.visit(&connection.vertex, &levels.path, context, state, stats)
    }

    fn visit(
        &self,
        vertex: &Vertex,
        path: &Path,
        context: &C,
        state: &mut S,
        stats: &mut RunStats,
    ) -> TraversalResult<bool> {
        stats.visited += 1;
        match (self.visitor)(self, vertex, path, context, state)? {
            VisitControl::Continue => Ok(true),
            VisitControl::Halt => Ok(false),
        }
    }
}

fn exhausted(cursor: Cursor) -> TraversalError {
    TraversalError::Internal {
        code: CODE_STACK_EXHAUSTED,
        message: format!(
            "no element at level {} index {}",
            cursor.level, cursor.index
        ),
    }
}

/// Builder for [`Traverser`]
///
/// Only the visitor is required. The filter defaults to including every
/// vertex and the expander to following edges in `direction` (outbound
/// unless changed). Callbacks are boxed as `'static` trait objects, so
/// generic function items such as `inbound_expander` need an owned or
/// `Arc` store; with a borrowed store prefer `direction` or a closure.
pub struct TraverserBuilder<G, C = (), S = ()> {
    store: G,
    edge_collection: String,
    direction: Direction,
    visitor: Option<Box<VisitorFn<G, C, S>>>,
    filter: Option<Box<FilterFn<G, C, S>>>,
    expander: Option<Box<ExpanderFn<G, C, S>>>,
}

impl<G: GraphStore, C, S> TraverserBuilder<G, C, S> {
    pub fn new(store: G, edge_collection: impl Into<String>) -> Self {
        Self {
            store,
            edge_collection: edge_collection.into(),
            direction: Direction::Outbound,
            visitor: None,
            filter: None,
            expander: None,
        }
    }

    pub fn visitor<F>(mut self, visitor: F) -> Self
    where
        F: Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> TraversalResult<VisitControl>
            + Send
            + Sync
            + 'static,
    {
        self.visitor = Some(Box::new(visitor));
        self
    }

    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> FilterDirective
            + Send
            + Sync
            + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn expander<F>(mut self, expander: F) -> Self
    where
        F: Fn(&Traverser<G, C, S>, &Vertex, &Path, &C, &mut S) -> TraversalResult<Vec<Connection>>
            + Send
            + Sync
            + 'static,
    {
        self.expander = Some(Box::new(expander));
        self
    }

    /// Direction followed by the default expander
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Resolve the edge collection and assemble the traverser
    ///
    /// Fails with `CollectionNotFound` for an unknown collection and with a
    /// configuration error for a non-edge collection or a missing visitor.
    pub fn build(self) -> TraversalResult<Traverser<G, C, S>> {
        if self.edge_collection.is_empty() {
            return Err(ConfigError::MissingParameter {
                name: "edge_collection",
            }
            .into());
        }

        let edge_collection = self
            .store
            .resolve_collection(&self.edge_collection)?
            .ok_or_else(|| TraversalError::CollectionNotFound {
                name: self.edge_collection.clone(),
            })?;

        if !edge_collection.is_edge() {
            return Err(ConfigError::InvalidParameter {
                name: "edge_collection",
                message: format!("'{}' is not an edge collection", edge_collection.name),
            }
            .into());
        }

        let visitor = self
            .visitor
            .ok_or(ConfigError::MissingParameter { name: "visitor" })?;

        Ok(Traverser {
            store: self.store,
            edge_collection,
            direction: self.direction,
            visitor,
            filter: self.filter.map_or(FilterPolicy::IncludeAll, FilterPolicy::Custom),
            expander: self
                .expander
                .map_or(ExpanderPolicy::Adjacent, ExpanderPolicy::Custom),
        })
    }
}
