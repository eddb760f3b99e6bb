//! Shared tree handle.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::widgets::selection::SelectionMode;

use super::events::TreeEvent;
use super::filter::TreeView;
use super::node::{NodeId, TreeNode};
use super::state::{NodeData, TreeState};

/// Unique identifier for a Tree widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tree_{}", self.0)
    }
}

/// Cloneable handle to a [`TreeState`] with dirty tracking.
///
/// Clones share the same state, so an event handler and a renderer can
/// each hold one. Every effective mutation sets the dirty flag; the
/// renderer redraws when [`Tree::is_dirty`] is set and then clears it.
///
/// # Example
///
/// ```ignore
/// let tree = Tree::with_items(forest, TreeConfig::new(SelectionMode::Single))?;
/// let renderer = tree.clone();
///
/// tree.click("docs")?;
/// if renderer.is_dirty() {
///     renderer.with_state(|state| draw(state, &state.full_view()));
///     renderer.clear_dirty();
/// }
/// ```
#[derive(Debug)]
pub struct Tree {
    /// Unique identifier.
    id: TreeId,
    /// Shared engine.
    inner: Arc<RwLock<TreeState>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new(config: TreeConfig) -> Self {
        Self::from_state(TreeState::new(Vec::new(), config).unwrap_or_default())
    }

    /// Create a tree with initial root items.
    pub fn with_items(roots: Vec<TreeNode>, config: TreeConfig) -> Result<Self, TreeError> {
        Ok(Self::from_state(TreeState::new(roots, config)?))
    }

    /// Wrap an existing engine.
    pub fn from_state(state: TreeState) -> Self {
        Self {
            id: TreeId::new(),
            inner: Arc::new(RwLock::new(state)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Run a closure with read access to the engine.
    pub fn with_state<R>(&self, f: impl FnOnce(&TreeState) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    /// Run a closure with write access.
    ///
    /// The tree is marked dirty only if the closure changed it (see
    /// [`TreeState::revision`]).
    pub fn update<R>(&self, f: impl FnOnce(&mut TreeState) -> R) -> Result<R, TreeError> {
        let mut guard = self.inner.write().map_err(|_| TreeError::Poisoned)?;
        let before = guard.revision();
        let result = f(&mut guard);
        if guard.revision() != before {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(result)
    }

    /// Apply a fallible command. Failed commands never mark the tree dirty.
    fn apply<R>(
        &self,
        f: impl FnOnce(&mut TreeState) -> Result<R, TreeError>,
    ) -> Result<R, TreeError> {
        let mut guard = self.inner.write().map_err(|_| TreeError::Poisoned)?;
        let before = guard.revision();
        let result = f(&mut guard)?;
        if guard.revision() != before {
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(result)
    }

    /// Snapshot of a node by id.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<NodeData> {
        let id = id.into();
        self.with_state(|state| state.node(id).cloned()).flatten()
    }

    /// Rebuild the nested forest.
    pub fn roots(&self) -> Vec<TreeNode> {
        self.with_state(TreeState::to_forest).unwrap_or_default()
    }

    /// Replace all items.
    pub fn set_items(&self, roots: Vec<TreeNode>) -> Result<(), TreeError> {
        self.apply(|state| state.set_items(roots))
    }

    /// Check if the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.with_state(TreeState::is_empty).unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Handle a click on a node.
    pub fn click(&self, id: impl Into<NodeId>) -> Result<(), TreeError> {
        self.apply(|state| state.click(id))
    }

    /// Toggle expand/collapse for a node.
    pub fn toggle_expand(&self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        self.apply(|state| state.toggle_expand(id))
    }

    /// Expand a node.
    pub fn expand(&self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        self.apply(|state| state.expand(id))
    }

    /// Collapse a node.
    pub fn collapse(&self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        self.apply(|state| state.collapse(id))
    }

    /// Expand all nodes.
    pub fn expand_all(&self) {
        let _ = self.update(TreeState::expand_all);
    }

    /// Collapse all nodes.
    pub fn collapse_all(&self) {
        let _ = self.update(TreeState::collapse_all);
    }

    /// Select a node. Returns the resulting selection.
    pub fn select(&self, id: impl Into<NodeId>) -> Result<Vec<NodeId>, TreeError> {
        self.apply(|state| state.select(id))
    }

    /// Clear all selection.
    pub fn clear_selection(&self) -> Vec<NodeId> {
        self.update(TreeState::clear_selection).unwrap_or_default()
    }

    /// Set the selection mode.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        let _ = self.update(|state| state.set_selection_mode(mode));
    }

    /// Set a node's checkbox with cascade.
    pub fn set_checked(&self, id: impl Into<NodeId>, checked: bool) -> Result<bool, TreeError> {
        self.apply(|state| state.set_checked(id, checked))
    }

    /// Flip a node's checkbox.
    pub fn toggle_checked(&self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        self.apply(|state| state.toggle_checked(id))
    }

    /// Selected ids in pre-order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.with_state(TreeState::selected_ids).unwrap_or_default()
    }

    /// Checked ids in pre-order.
    pub fn checked_ids(&self) -> Vec<NodeId> {
        self.with_state(TreeState::checked_ids).unwrap_or_default()
    }

    /// Build a filtered view.
    pub fn filter(&self, query: &str) -> TreeView {
        self.with_state(|state| state.filter(query)).unwrap_or_default()
    }

    /// Take queued events.
    pub fn drain_events(&self) -> Vec<TreeEvent> {
        self.inner
            .write()
            .map(|mut guard| guard.drain_events())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the tree has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Tree {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}
