use std::fmt;

use thiserror::Error;

use crate::graph::NodeIndex;

/// A shortest-path query found its endpoints disconnected.
///
/// Recoverable: the planner skips the candidate ordering or walk leg that
/// produced it.
///
/// `Display`/`Error` are implemented by hand rather than via `derive(Error)`
/// because the field named `source` would be picked up by thiserror as the
/// error source and require `NodeIndex: std::error::Error`, which it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoPathError {
    pub source: NodeIndex,
    pub target: NodeIndex,
}

impl fmt::Display for NoPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no path from node {} to node {}",
            self.source, self.target
        )
    }
}

impl std::error::Error for NoPathError {}

/// Every candidate stop ordering contained an unreachable leg, so the
/// shopping list cannot be satisfied with the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no ordering of the shopping list reaches the billing counter")]
pub struct NoValidRouteError;
