//! Tree widget state for hierarchical data.
//!
//! The tree keeps a forest of nodes and mutates their flags in response
//! to discrete commands: expand/collapse, single or multiple selection,
//! cascading checkboxes and search filtering.
//!
//! # Example
//!
//! ```ignore
//! use sprig::prelude::*;
//!
//! let forest = vec![
//!     TreeNode::new("src", "src").with_children(vec![
//!         TreeNode::new("lib", "lib.rs"),
//!         TreeNode::new("main", "main.rs"),
//!     ]),
//! ];
//!
//! let mut state = TreeState::new(forest, TreeConfig::new(SelectionMode::Checkbox))?;
//! state.set_checked("lib", true)?;
//! assert!(state.node("src").unwrap().indeterminate);
//!
//! let view = state.filter("main");
//! for row in view.rows() {
//!     // render row.depth, state.get(row.index) ...
//! }
//! ```

mod events;
mod filter;
mod handle;
mod node;
mod state;

pub use events::TreeEvent;
pub use filter::{FlatNode, TreeView, ViewNode};
pub use handle::{Tree, TreeId};
pub use node::{NodeDecoration, NodeId, TreeNode};
pub use state::{NodeData, NodeIndex, Preorder, TreeState};
