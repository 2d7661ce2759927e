//! Error types for geometric operations.

use thiserror::Error;

/// Errors that can occur while constructing shapes or resolving polygon
/// topology.
///
/// Empty query results (no intersection, nothing in range) are never errors;
/// they are returned as empty collections or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A shape cannot be constructed from the given parameters, e.g. a line
    /// through two coincident points or with a zero normal vector.
    #[error("illegal parameters")]
    IllegalParameters,

    /// Boundary conflict resolution in a boolean operation could not settle
    /// on a consistent edge classification. Indicates degenerate or
    /// inconsistent input rather than a recoverable condition.
    #[error("unresolved boundary conflict in boolean operation")]
    UnresolvedBoundaryConflict,

    /// A face's edge chain is not a proper closed cycle; a walk over the
    /// chain failed to terminate at the starting edge.
    #[error("infinite loop in edge chain")]
    InfiniteLoop,
}
