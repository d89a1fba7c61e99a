//! Error types for the tree store.

use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Duplicate child ids are deliberately not represented here: a malformed
/// page of results must not abort the rest of a merge, so the offending
/// child is dropped and reported through `tracing::warn!` instead.
#[derive(Debug, Clone, Error)]
pub enum TreeError {
    /// Transport or authorization failure from a collaborator call
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Caller passed an id that is not present in the forest
    #[error("node not found in forest: {0}")]
    NotFound(String),
}
