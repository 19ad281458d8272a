//! Visitation strategies
//!
//! Three stateless state machines over one shared `LevelState`:
//!
//! - **Breadth-first**: every connection of a level, in discovery order,
//!   before the next level. Paths are rebuilt from parent links on demand.
//! - **Depth-first pre-order**: a vertex before its descendants.
//! - **Depth-first post-order**: a vertex after all its descendants.
//!
//! The traverser enters the element returned by `current_element`
//! (uniqueness, filter, expansion and, for pre-order strategies, the
//! visitor), then calls `advance`. Post-order strategies report finished
//! elements through the `leave` hook while they advance.

use super::directive::VisitOrder;
use super::level_state::{Cursor, LevelState};
use crate::error::{ConfigError, TraversalResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hook called for each element a post-order strategy leaves
///
/// Returns `Ok(false)` to stop the run.
pub type LeaveHook<'a> = dyn FnMut(&LevelState, Cursor) -> TraversalResult<bool> + 'a;

/// Common interface of the three traversal orders
pub trait VisitationStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Element to enter next; the state's path is made to end at it
    ///
    /// `None` means the stack is exhausted. Callers must stop once
    /// `advance` returned false instead of asking again.
    fn current_element(&self, state: &mut LevelState) -> Option<Cursor>;

    /// Move to the next element to enter
    ///
    /// Returns false when no element is left or `leave` asked to stop.
    fn advance(&self, state: &mut LevelState, leave: &mut LeaveHook<'_>) -> TraversalResult<bool>;
}

/// Selects one of the visitation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    BreadthFirst,
    DepthFirstPre,
    DepthFirstPost,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::BreadthFirst,
        StrategyKind::DepthFirstPre,
        StrategyKind::DepthFirstPost,
    ];

    /// The strategy implementation for this kind
    pub fn strategy(&self) -> &'static dyn VisitationStrategy {
        match self {
            StrategyKind::BreadthFirst => &BreadthFirst,
            StrategyKind::DepthFirstPre => &DepthFirstPre,
            StrategyKind::DepthFirstPost => &DepthFirstPost,
        }
    }

    /// When the visitor fires under this strategy
    pub fn order(&self) -> VisitOrder {
        match self {
            StrategyKind::BreadthFirst | StrategyKind::DepthFirstPre => VisitOrder::PreOrder,
            StrategyKind::DepthFirstPost => VisitOrder::PostOrder,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            StrategyKind::BreadthFirst => 0,
            StrategyKind::DepthFirstPre => 1,
            StrategyKind::DepthFirstPost => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::BreadthFirst => "breadth_first",
            StrategyKind::DepthFirstPre => "depth_first_pre",
            StrategyKind::DepthFirstPost => "depth_first_post",
        }
    }
}

impl TryFrom<u8> for StrategyKind {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StrategyKind::BreadthFirst),
            1 => Ok(StrategyKind::DepthFirstPre),
            2 => Ok(StrategyKind::DepthFirstPost),
            other => Err(ConfigError::InvalidParameter {
                name: "strategy",
                message: format!("unknown visitation strategy code {}", other),
            }),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth_first" | "bfs" => Ok(StrategyKind::BreadthFirst),
            "depth_first_pre" | "dfs" | "dfs_pre" => Ok(StrategyKind::DepthFirstPre),
            "depth_first_post" | "dfs_post" => Ok(StrategyKind::DepthFirstPost),
            other => Err(ConfigError::InvalidParameter {
                name: "strategy",
                message: format!("unknown visitation strategy '{}'", other),
            }),
        }
    }
}

/// Breadth-first strategy (flat `index` cursor per level)
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl VisitationStrategy for BreadthFirst {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BreadthFirst
    }

    fn current_element(&self, state: &mut LevelState) -> Option<Cursor> {
        if state.level > state.max_level {
            return None;
        }
        let cursor = Cursor {
            level: state.level,
            index: state.index,
        };
        state.element_at(cursor)?;
        state.rebuild_path(cursor);
        Some(cursor)
    }

    fn advance(&self, state: &mut LevelState, _leave: &mut LeaveHook<'_>) -> TraversalResult<bool> {
        state.index += 1;
        if state.index >= state.num_elements(state.level) {
            state.index = 0;
            state.level += 1;
            if state.level > state.max_level {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Depth-first pre-order strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstPre;

impl VisitationStrategy for DepthFirstPre {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DepthFirstPre
    }

    fn current_element(&self, state: &mut LevelState) -> Option<Cursor> {
        depth_first_cursor(state)
    }

    fn advance(&self, state: &mut LevelState, _leave: &mut LeaveHook<'_>) -> TraversalResult<bool> {
        if state.can_descend() {
            descend(state);
            return Ok(true);
        }

        loop {
            if next_sibling(state) {
                return Ok(true);
            }
            if !state.discard_level() {
                return Ok(false);
            }
        }
    }
}

/// Depth-first post-order strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstPost;

impl VisitationStrategy for DepthFirstPost {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DepthFirstPost
    }

    fn current_element(&self, state: &mut LevelState) -> Option<Cursor> {
        depth_first_cursor(state)
    }

    fn advance(&self, state: &mut LevelState, leave: &mut LeaveHook<'_>) -> TraversalResult<bool> {
        // Children of a freshly entered element must be entered (and
        // expanded) one level at a time before it can be left.
        if state.can_descend() {
            descend(state);
            return Ok(true);
        }

        let cursor = Cursor {
            level: state.level,
            index: state.positions[state.level],
        };
        if !leave(&*state, cursor)? {
            return Ok(false);
        }

        loop {
            if next_sibling(state) {
                return Ok(true);
            }
            if !state.discard_level() {
                return Ok(false);
            }

            // Last child done: the parent is finished as well
            let parent = Cursor {
                level: state.level,
                index: state.positions[state.level],
            };
            if !leave(&*state, parent)? {
                return Ok(false);
            }
        }
    }
}

fn depth_first_cursor(state: &LevelState) -> Option<Cursor> {
    let cursor = Cursor {
        level: state.level,
        index: *state.positions.get(state.level)?,
    };
    state.element_at(cursor).map(|_| cursor)
}

fn descend(state: &mut LevelState) {
    state.level += 1;
    state.positions[state.level] = 0;
    state.sync_path();
}

/// Move the cursor of the current level forward; false when exhausted
fn next_sibling(state: &mut LevelState) -> bool {
    let level = state.level;
    state.positions[level] += 1;
    if state.positions[level] < state.num_elements(level) {
        state.sync_path();
        true
    } else {
        false
    }
}
