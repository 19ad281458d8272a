//! Callback outcomes: filter directives and visitor control

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of the filter callback for one vertex
///
/// Inclusion (is the visitor called?) and continuation (are the vertex's
/// connections expanded?) form one 2x2 decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDirective {
    /// Visit the vertex and expand its connections
    #[default]
    IncludeAndContinue,
    /// Visit the vertex, do not expand it
    IncludeAndPrune,
    /// Skip the visitor but walk through the vertex
    ExcludeAndContinue,
    /// Skip the vertex and everything only reachable through it
    ExcludeAndPrune,
}

impl FilterDirective {
    /// Whether the visitor is invoked for the vertex
    pub fn includes(&self) -> bool {
        matches!(
            self,
            FilterDirective::IncludeAndContinue | FilterDirective::IncludeAndPrune
        )
    }

    /// Whether the vertex's connections are expanded
    pub fn continues(&self) -> bool {
        matches!(
            self,
            FilterDirective::IncludeAndContinue | FilterDirective::ExcludeAndContinue
        )
    }

    /// Numeric code used by scripting callers
    pub fn code(&self) -> u8 {
        match self {
            FilterDirective::IncludeAndContinue => 0,
            FilterDirective::IncludeAndPrune => 1,
            FilterDirective::ExcludeAndContinue => 2,
            FilterDirective::ExcludeAndPrune => 3,
        }
    }
}

impl TryFrom<u8> for FilterDirective {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(FilterDirective::IncludeAndContinue),
            1 => Ok(FilterDirective::IncludeAndPrune),
            2 => Ok(FilterDirective::ExcludeAndContinue),
            3 => Ok(FilterDirective::ExcludeAndPrune),
            other => Err(ConfigError::InvalidParameter {
                name: "filter_directive",
                message: format!("unknown directive code {}", other),
            }),
        }
    }
}

impl FromStr for FilterDirective {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include_and_continue" => Ok(FilterDirective::IncludeAndContinue),
            "include_and_prune" => Ok(FilterDirective::IncludeAndPrune),
            "exclude_and_continue" => Ok(FilterDirective::ExcludeAndContinue),
            "exclude_and_prune" => Ok(FilterDirective::ExcludeAndPrune),
            other => Err(ConfigError::InvalidParameter {
                name: "filter_directive",
                message: format!("unknown directive '{}'", other),
            }),
        }
    }
}

/// Returned by the visitor to keep walking or stop the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitControl {
    #[default]
    Continue,
    /// Stop the traversal; `traverse` returns `Ok(())`
    Halt,
}

/// When the visitor fires relative to an element's descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOrder {
    /// On entering the element, before any descendant
    PreOrder,
    /// On leaving the element, after every descendant
    PostOrder,
}

impl VisitOrder {
    pub fn code(&self) -> u8 {
        match self {
            VisitOrder::PreOrder => 0,
            VisitOrder::PostOrder => 1,
        }
    }
}
