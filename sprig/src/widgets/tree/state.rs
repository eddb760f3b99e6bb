//! Tree engine state.

use std::collections::HashMap;

use log::{debug, warn};

use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::widgets::events::EventQueue;
use crate::widgets::selection::SelectionMode;

use super::events::TreeEvent;
use super::node::{NodeDecoration, NodeId, TreeNode};

/// Position of a node in the tree's arena.
///
/// Indices are only meaningful for the [`TreeState`] that produced them and
/// are invalidated by [`TreeState::set_items`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw arena position.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Flags and display data of one node, without its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub label: String,
    pub expanded: bool,
    pub selected: bool,
    pub checked: bool,
    pub indeterminate: bool,
    pub disabled: bool,
    pub decoration: NodeDecoration,
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    /// Non-owning back-reference, `None` for roots.
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

/// Hierarchical state engine.
///
/// The supplied forest is flattened into an arena where every node keeps
/// the index of its parent, so check-state aggregation walks only the
/// ancestors of the touched node.
#[derive(Debug, Clone)]
pub struct TreeState {
    slots: Vec<Slot>,
    roots: Vec<NodeIndex>,
    index: HashMap<NodeId, NodeIndex>,
    config: TreeConfig,
    events: EventQueue<TreeEvent>,
    /// Bumped on every effective mutation.
    revision: u64,
}

impl Default for TreeState {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
            config: TreeConfig::default(),
            events: EventQueue::new(),
            revision: 0,
        }
    }
}

impl TreeState {
    /// Build the engine from a caller-supplied forest.
    ///
    /// Fails if two nodes share an id. In single mode only the first
    /// selected node (pre-order) stays selected; in checkbox mode check
    /// state is normalized so every invariant holds from the start.
    pub fn new(forest: Vec<TreeNode>, config: TreeConfig) -> Result<Self, TreeError> {
        let mut state = Self {
            config,
            ..Default::default()
        };
        state.load(forest)?;
        Ok(state)
    }

    /// Build with the default config (no selection).
    pub fn from_forest(forest: Vec<TreeNode>) -> Result<Self, TreeError> {
        Self::new(forest, TreeConfig::default())
    }

    /// Replace the whole forest. Previously handed out indices become invalid.
    pub fn set_items(&mut self, forest: Vec<TreeNode>) -> Result<(), TreeError> {
        let mut fresh = Self {
            config: self.config.clone(),
            ..Default::default()
        };
        fresh.load(forest)?;
        fresh.events = std::mem::take(&mut self.events);
        fresh.revision = self.revision.wrapping_add(1);
        *self = fresh;
        Ok(())
    }

    fn load(&mut self, forest: Vec<TreeNode>) -> Result<(), TreeError> {
        let capacity = forest.iter().map(TreeNode::subtree_len).sum();
        self.slots.reserve(capacity);
        self.index.reserve(capacity);
        self.insert_forest(forest)?;
        self.normalize_selection();
        if self.config.selection_mode.is_checkbox() {
            self.normalize_checks();
        }
        debug!("tree loaded with {} nodes", self.slots.len());
        Ok(())
    }

    /// Flatten the forest into slots in pre-order.
    fn insert_forest(&mut self, forest: Vec<TreeNode>) -> Result<(), TreeError> {
        let mut pending: Vec<(TreeNode, Option<NodeIndex>)> =
            forest.into_iter().rev().map(|node| (node, None)).collect();

        while let Some((node, parent)) = pending.pop() {
            let TreeNode {
                id,
                label,
                children,
                expanded,
                selected,
                checked,
                indeterminate,
                disabled,
                decoration,
            } = node;

            if self.index.contains_key(&id) {
                return Err(TreeError::duplicate(id));
            }
            let index = NodeIndex(self.slots.len());
            self.index.insert(id.clone(), index);
            self.slots.push(Slot {
                data: NodeData {
                    id,
                    label,
                    expanded,
                    selected,
                    checked,
                    indeterminate,
                    disabled,
                    decoration,
                },
                parent,
                children: Vec::with_capacity(children.len()),
            });
            match parent {
                Some(parent) => self.slots[parent.0].children.push(index),
                None => self.roots.push(index),
            }
            pending.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }
        Ok(())
    }

    /// Keep at most one selected node in single mode, none in modes without selection.
    fn normalize_selection(&mut self) {
        match self.config.selection_mode {
            SelectionMode::Single => {
                let selected: Vec<NodeIndex> = self
                    .preorder()
                    .filter(|i| self.slots[i.0].data.selected)
                    .collect();
                if selected.len() > 1 {
                    warn!(
                        "{} nodes selected in single mode, keeping only the first",
                        selected.len()
                    );
                    for index in &selected[1..] {
                        self.slots[index.0].data.selected = false;
                    }
                }
            }
            SelectionMode::Multiple => {}
            SelectionMode::None | SelectionMode::Checkbox => {
                for slot in &mut self.slots {
                    slot.data.selected = false;
                }
            }
        }
    }

    /// Cascade checked inner nodes down, then aggregate every inner node bottom-up.
    fn normalize_checks(&mut self) {
        let order: Vec<NodeIndex> = self.preorder().collect();
        for &index in &order {
            let slot = &mut self.slots[index.0];
            slot.data.indeterminate = false;
            if slot.data.checked && !slot.children.is_empty() {
                self.cascade(index, true);
            }
        }
        // Reverse pre-order visits every child before its parent.
        for &index in order.iter().rev() {
            if !self.slots[index.0].children.is_empty() {
                self.aggregate(index);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// The active configuration.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.config.selection_mode
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Root indices in order.
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// Resolve an id to its arena index.
    pub fn index_of(&self, id: impl Into<NodeId>) -> Option<NodeIndex> {
        self.index.get(&id.into()).copied()
    }

    /// Node data by id.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&NodeData> {
        self.index_of(id).map(|index| &self.slots[index.0].data)
    }

    /// Node data by index.
    pub fn get(&self, index: NodeIndex) -> Option<&NodeData> {
        self.slots.get(index.0).map(|slot| &slot.data)
    }

    /// Children of a node, empty for leaves and unknown indices.
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.slots
            .get(index.0)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node, `None` for roots.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.slots.get(index.0).and_then(|slot| slot.parent)
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(self.parent(index), move |&i| self.parent(i))
    }

    /// Whether the node has children.
    pub fn has_children(&self, index: NodeIndex) -> bool {
        !self.children(index).is_empty()
    }

    /// Pre-order traversal over the whole forest.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self, &self.roots)
    }

    /// Pre-order traversal of one subtree, starting with `index` itself.
    pub fn subtree(&self, index: NodeIndex) -> Preorder<'_> {
        Preorder::new(self, std::slice::from_ref(&index))
    }

    fn resolve(&self, id: impl Into<NodeId>) -> Result<NodeIndex, TreeError> {
        let id = id.into();
        match self.index.get(&id) {
            Some(&index) => Ok(index),
            None => {
                warn!("tree command on unknown node '{}'", id);
                Err(TreeError::not_found(id))
            }
        }
    }

    /// Rebuild the nested forest from the current state.
    pub fn to_forest(&self) -> Vec<TreeNode> {
        let mut built: Vec<Option<TreeNode>> = (0..self.slots.len()).map(|_| None).collect();
        // Children are built before their parent.
        let order: Vec<NodeIndex> = self.preorder().collect();
        for &index in order.iter().rev() {
            let slot = &self.slots[index.0];
            let children = slot
                .children
                .iter()
                .filter_map(|c| built[c.0].take())
                .collect();
            let data = slot.data.clone();
            built[index.0] = Some(TreeNode {
                id: data.id,
                label: data.label,
                children,
                expanded: data.expanded,
                selected: data.selected,
                checked: data.checked,
                indeterminate: data.indeterminate,
                disabled: data.disabled,
                decoration: data.decoration,
            });
        }
        self.roots.iter().filter_map(|r| built[r.0].take()).collect()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<TreeEvent> {
        self.events.drain()
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Counter that changes whenever a command changes the tree.
    ///
    /// Commands that leave every flag as it was (re-selecting the selected
    /// node, clicking a disabled node, unknown ids) keep it unchanged.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Flip `expanded` on a node with children.
    ///
    /// Leaves and disabled nodes are left alone. Returns whether the flag changed.
    pub fn toggle_expand(&mut self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        let index = self.resolve(id)?;
        let expanded = self.slots[index.0].data.expanded;
        Ok(self.set_expanded(index, !expanded))
    }

    /// Expand a node. Returns whether the flag changed.
    pub fn expand(&mut self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        let index = self.resolve(id)?;
        Ok(self.set_expanded(index, true))
    }

    /// Collapse a node. Returns whether the flag changed.
    pub fn collapse(&mut self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        let index = self.resolve(id)?;
        Ok(self.set_expanded(index, false))
    }

    fn set_expanded(&mut self, index: NodeIndex, expanded: bool) -> bool {
        let slot = &mut self.slots[index.0];
        if slot.children.is_empty() || slot.data.disabled || slot.data.expanded == expanded {
            return false;
        }
        slot.data.expanded = expanded;
        let id = slot.data.id.clone();
        self.touch();
        debug!("node '{}' expanded={}", id, expanded);
        self.events.push(if expanded {
            TreeEvent::Expand { id }
        } else {
            TreeEvent::Collapse { id }
        });
        true
    }

    /// Set `expanded = true` on every node, leaves included.
    pub fn expand_all(&mut self) {
        self.set_all_expanded(true);
    }

    /// Set `expanded = false` on every node.
    pub fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    fn set_all_expanded(&mut self, expanded: bool) {
        let mut changed = false;
        for slot in &mut self.slots {
            changed |= slot.data.expanded != expanded;
            slot.data.expanded = expanded;
        }
        if changed {
            self.touch();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Change the selection mode.
    ///
    /// Leaving a selection mode clears `selected`; switching to single keeps
    /// only the first selected node; entering checkbox mode normalizes checks.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.config.selection_mode == mode {
            return;
        }
        let before = self.selected_ids();
        self.config.selection_mode = mode;
        self.normalize_selection();
        if mode.is_checkbox() {
            self.normalize_checks();
        }
        self.touch();
        let after = self.selected_ids();
        if before != after {
            self.events.push(TreeEvent::SelectionChanged { selected: after });
        }
    }

    /// Select a node according to the selection mode.
    ///
    /// - `single`: clears every other node, then selects the target.
    /// - `multiple`: toggles the target only.
    /// - `none` / `checkbox`: no-op.
    ///
    /// Disabled targets are ignored. Returns the resulting selection in pre-order.
    pub fn select(&mut self, id: impl Into<NodeId>) -> Result<Vec<NodeId>, TreeError> {
        let index = self.resolve(id)?;
        if self.slots[index.0].data.disabled {
            debug!("ignoring select on disabled node '{}'", self.slots[index.0].data.id);
            return Ok(self.selected_ids());
        }

        let changed = match self.config.selection_mode {
            SelectionMode::Single => {
                let mut changed = false;
                for (i, slot) in self.slots.iter_mut().enumerate() {
                    let want = i == index.0;
                    if slot.data.selected != want {
                        slot.data.selected = want;
                        changed = true;
                    }
                }
                changed
            }
            SelectionMode::Multiple => {
                let data = &mut self.slots[index.0].data;
                data.selected = !data.selected;
                true
            }
            SelectionMode::None | SelectionMode::Checkbox => false,
        };

        let selected = self.selected_ids();
        if changed {
            self.touch();
            self.events.push(TreeEvent::SelectionChanged {
                selected: selected.clone(),
            });
        }
        Ok(selected)
    }

    /// Deselect everything. Returns the ids that were selected.
    pub fn clear_selection(&mut self) -> Vec<NodeId> {
        let cleared = self.selected_ids();
        if cleared.is_empty() {
            return cleared;
        }
        for slot in &mut self.slots {
            slot.data.selected = false;
        }
        self.touch();
        self.events.push(TreeEvent::SelectionChanged {
            selected: Vec::new(),
        });
        cleared
    }

    /// Selected node ids in pre-order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.collect_ids(|data| data.selected)
    }

    /// Checked node ids in pre-order.
    pub fn checked_ids(&self) -> Vec<NodeId> {
        self.collect_ids(|data| data.checked)
    }

    fn collect_ids(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.preorder()
            .map(|i| &self.slots[i.0].data)
            .filter(|data| predicate(data))
            .map(|data| data.id.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Checkbox cascade
    // -------------------------------------------------------------------------

    /// Set a node's checkbox and cascade it to every descendant, then
    /// recompute each ancestor up to the root.
    ///
    /// Only effective in checkbox mode; disabled targets are ignored.
    /// Returns whether anything was applied.
    pub fn set_checked(&mut self, id: impl Into<NodeId>, checked: bool) -> Result<bool, TreeError> {
        let index = self.resolve(id)?;
        if !self.config.selection_mode.is_checkbox() {
            debug!(
                "ignoring check outside checkbox mode (mode={})",
                self.config.selection_mode
            );
            return Ok(false);
        }
        if self.slots[index.0].data.disabled {
            debug!("ignoring check on disabled node '{}'", self.slots[index.0].data.id);
            return Ok(false);
        }

        self.cascade(index, checked);
        self.recompute_ancestors(index);
        self.touch();
        self.events.push(TreeEvent::Check {
            id: self.slots[index.0].data.id.clone(),
            checked,
        });
        Ok(true)
    }

    /// Flip a node's checkbox. Indeterminate nodes become checked.
    pub fn toggle_checked(&mut self, id: impl Into<NodeId>) -> Result<bool, TreeError> {
        let index = self.resolve(id)?;
        let checked = self.slots[index.0].data.checked;
        let id = self.slots[index.0].data.id.clone();
        self.set_checked(id, !checked)
    }

    fn cascade(&mut self, index: NodeIndex, checked: bool) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.0];
            slot.data.checked = checked;
            slot.data.indeterminate = false;
            stack.extend(slot.children.iter().copied());
        }
    }

    fn recompute_ancestors(&mut self, index: NodeIndex) {
        let mut current = self.slots[index.0].parent;
        while let Some(ancestor) = current {
            self.aggregate(ancestor);
            current = self.slots[ancestor.0].parent;
        }
    }

    /// Derive `checked` / `indeterminate` of an inner node from its direct children.
    fn aggregate(&mut self, index: NodeIndex) {
        let (all, any) = self.slots[index.0]
            .children
            .iter()
            .map(|c| &self.slots[c.0].data)
            .fold((true, false), |(all, any), child| {
                (all && child.checked, any || child.checked || child.indeterminate)
            });
        let data = &mut self.slots[index.0].data;
        data.checked = all;
        data.indeterminate = any && !all;
    }

    // -------------------------------------------------------------------------
    // Click
    // -------------------------------------------------------------------------

    /// Handle a click on a node.
    ///
    /// Queues `Click`, then selects (single/multiple) or toggles the
    /// checkbox (checkbox mode). With `expand_on_click`, also toggles
    /// expansion. Disabled nodes ignore clicks entirely.
    pub fn click(&mut self, id: impl Into<NodeId>) -> Result<(), TreeError> {
        let index = self.resolve(id)?;
        let data = &self.slots[index.0].data;
        if data.disabled {
            debug!("ignoring click on disabled node '{}'", data.id);
            return Ok(());
        }
        let id = data.id.clone();
        self.events.push(TreeEvent::Click { id: id.clone() });

        match self.config.selection_mode {
            SelectionMode::Single | SelectionMode::Multiple => {
                self.select(id.clone())?;
            }
            SelectionMode::Checkbox => {
                self.toggle_checked(id.clone())?;
            }
            SelectionMode::None => {}
        }

        if self.config.expand_on_click {
            self.toggle_expand(id)?;
        }
        Ok(())
    }
}

/// Depth-first pre-order iterator over node indices.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    state: &'a TreeState,
    stack: Vec<NodeIndex>,
}

impl<'a> Preorder<'a> {
    fn new(state: &'a TreeState, roots: &[NodeIndex]) -> Self {
        Self {
            state,
            stack: roots.iter().rev().copied().collect(),
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        self.stack
            .extend(self.state.children(index).iter().rev().copied());
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new("a", "A").with_children(vec![
                TreeNode::new("b", "B"),
                TreeNode::new("c", "C")
                    .with_children(vec![TreeNode::new("d", "D"), TreeNode::new("e", "E")]),
            ]),
            TreeNode::new("f", "F"),
        ]
    }

    #[test]
    fn test_preorder_order() {
        let state = TreeState::from_forest(sample()).unwrap();
        let ids: Vec<String> = state
            .preorder()
            .map(|i| state.get(i).unwrap().id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_parent_links() {
        let state = TreeState::from_forest(sample()).unwrap();
        let d = state.index_of("d").unwrap();
        let ancestors: Vec<NodeId> = state
            .ancestors(d)
            .map(|i| state.get(i).unwrap().id.clone())
            .collect();
        assert_eq!(ancestors, vec![NodeId::from("c"), NodeId::from("a")]);
        assert_eq!(state.parent(state.index_of("a").unwrap()), None);
    }

    #[test]
    fn test_aggregate_mixed_children() {
        let forest = vec![
            TreeNode::new("p", "P")
                .with_children(vec![TreeNode::new("x", "X").checked(), TreeNode::new("y", "Y")]),
        ];
        let state = TreeState::new(forest, TreeConfig::new(SelectionMode::Checkbox)).unwrap();
        let p = state.node("p").unwrap();
        assert!(!p.checked);
        assert!(p.indeterminate);
    }

    #[test]
    fn test_checked_parent_cascades_on_load() {
        let forest = vec![
            TreeNode::new("p", "P")
                .checked()
                .with_children(vec![TreeNode::new("x", "X"), TreeNode::new("y", "Y")]),
        ];
        let state = TreeState::new(forest, TreeConfig::new(SelectionMode::Checkbox)).unwrap();
        assert!(state.node("x").unwrap().checked);
        assert!(state.node("y").unwrap().checked);
        assert!(state.node("p").unwrap().checked);
    }
}
