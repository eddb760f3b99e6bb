//! Component state for sprig widgets.
//!
//! Each widget here owns the state behind one interactive component and
//! exposes it through plain methods. Nothing in this module renders; a
//! host UI reads the state back after each call and redraws.
//!
//! # Event Queue Pattern
//!
//! Instead of invoking callbacks, widgets queue typed events:
//!
//! ```ignore
//! tree.click("docs")?;
//! for event in tree.drain_events() {
//!     match event {
//!         TreeEvent::SelectionChanged { selected } => { /* ... */ }
//!         _ => {}
//!     }
//! }
//! ```
//!
//! This keeps state transitions synchronous and lets the host decide when
//! and how notifications reach its own handlers.

pub mod bottom_sheet;
pub mod events;
pub mod selection;
pub mod snackbar;
pub mod tree;

pub use bottom_sheet::{BottomSheet, SheetDrag, SheetOutcome};
pub use events::EventQueue;
pub use selection::SelectionMode;
pub use snackbar::{
    ActiveSnackbar, DismissReason, Snackbar, SnackbarEvent, SnackbarId, SnackbarLevel,
    SnackbarQueue,
};
pub use tree::{
    FlatNode, NodeData, NodeDecoration, NodeId, NodeIndex, Tree, TreeEvent, TreeId, TreeNode,
    TreeState, TreeView, ViewNode,
};
