//! Tree error types

use crate::widgets::NodeId;

/// Errors that can occur while building or mutating a tree.
///
/// Operations on disabled nodes are not errors; they report "unchanged"
/// through their return value instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The referenced node is not part of the forest (stale or foreign id).
    #[error("Node '{id}' not found in tree")]
    NotFound { id: NodeId },

    /// Two nodes in the supplied forest share the same id.
    #[error("Duplicate node id '{id}' in forest")]
    DuplicateId { id: NodeId },

    /// The shared tree state was poisoned by a panicking writer.
    #[error("Tree state lock poisoned")]
    Poisoned,
}

impl TreeError {
    /// Creates a new not-found error.
    pub fn not_found(id: impl Into<NodeId>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new duplicate-id error.
    pub fn duplicate(id: impl Into<NodeId>) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}
