//! Graph traversal engine
//!
//! The engine walks an implicitly growing tree of reachable vertices
//! without materializing the graph. Its working memory is the level stack
//! (`LevelState`); the strategies decide the order in which the stack is
//! consumed, and the traverser applies the filter/visit/expand protocol to
//! each element they select.

pub mod connection;
pub mod directive;
pub mod expander;
pub mod level_state;
pub mod path;
pub mod strategy;
pub mod traverser;
pub mod uniqueness;

pub use connection::Connection;
pub use directive::{FilterDirective, VisitControl, VisitOrder};
pub use expander::{
    direction_expander, expand, inbound_expander, include_all_filter, outbound_expander,
};
pub use level_state::{Cursor, LevelState};
pub use path::Path;
pub use strategy::{
    BreadthFirst, DepthFirstPost, DepthFirstPre, StrategyKind, VisitationStrategy,
};
pub use traverser::{StartVertex, Traverser, TraverserBuilder};
pub use uniqueness::{Uniqueness, UniquenessPolicy, UniquenessTracker};
