//! Events produced by the tree.

use super::node::NodeId;

/// Notification queued by a tree command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// A node was clicked (queued before any selection/check side effect).
    Click { id: NodeId },
    /// A node was expanded.
    Expand { id: NodeId },
    /// A node was collapsed.
    Collapse { id: NodeId },
    /// A node's checkbox was set by the user (not by cascade).
    Check { id: NodeId, checked: bool },
    /// The selection changed; carries the full selection in pre-order.
    SelectionChanged { selected: Vec<NodeId> },
}

impl TreeEvent {
    /// The node the event is about, if it concerns a single node.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::Click { id }
            | Self::Expand { id }
            | Self::Collapse { id }
            | Self::Check { id, .. } => Some(id),
            Self::SelectionChanged { .. } => None,
        }
    }
}
