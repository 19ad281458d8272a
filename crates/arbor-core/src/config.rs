//! Traversal options
//!
//! The strategy is REQUIRED - there is no implicit default order.
//! Uniqueness defaults to NONE for both dimensions and direction to
//! outbound, matching what callers get when they omit them.
//!
//! Options can come from serde (snake_case names) or from environment
//! variables:
//!
//! - `ARBOR_STRATEGY` - `breadth_first`, `depth_first_pre`, `depth_first_post`
//! - `ARBOR_VERTEX_UNIQUENESS` - `none`, `path`, `global`
//! - `ARBOR_EDGE_UNIQUENESS` - `none`, `path`, `global`
//! - `ARBOR_DIRECTION` - `outbound`, `inbound`

use crate::error::ConfigError;
use crate::graph::{StrategyKind, Uniqueness};
use crate::types::Direction;
use serde::{Deserialize, Serialize};

pub const ENV_STRATEGY: &str = "ARBOR_STRATEGY";
pub const ENV_VERTEX_UNIQUENESS: &str = "ARBOR_VERTEX_UNIQUENESS";
pub const ENV_EDGE_UNIQUENESS: &str = "ARBOR_EDGE_UNIQUENESS";
pub const ENV_DIRECTION: &str = "ARBOR_DIRECTION";

/// Options for one traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraversalOptions {
    pub strategy: StrategyKind,
    #[serde(default)]
    pub uniqueness: Uniqueness,
    #[serde(default)]
    pub direction: Direction,
}

impl TraversalOptions {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            uniqueness: Uniqueness::default(),
            direction: Direction::default(),
        }
    }

    pub fn with_uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Load options from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through a key lookup (environment or any other source)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let strategy = lookup(ENV_STRATEGY)
            .ok_or(ConfigError::MissingParameter { name: "strategy" })?
            .parse()?;

        let mut options = Self::new(strategy);
        if let Some(value) = lookup(ENV_VERTEX_UNIQUENESS) {
            options.uniqueness.vertices = value.parse()?;
        }
        if let Some(value) = lookup(ENV_EDGE_UNIQUENESS) {
            options.uniqueness.edges = value.parse()?;
        }
        if let Some(value) = lookup(ENV_DIRECTION) {
            options.direction = value.parse()?;
        }

        Ok(options)
    }
}
