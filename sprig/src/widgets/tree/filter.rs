//! Search filtering and flattened row views.

use log::debug;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::config::{SearchKey, SearchMode};

use super::node::TreeNode;
use super::state::{NodeData, NodeIndex, TreeState};

/// One node of a derived view, pointing back into the canonical tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    /// Canonical node this entry shows.
    pub index: NodeIndex,
    /// Expansion as shown in the view (forced on for ancestors of a match).
    pub expanded: bool,
    /// Whether the node itself matched the query.
    pub matched: bool,
    /// Children kept in the view.
    pub children: Vec<ViewNode>,
}

/// A visible node in the flattened view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode {
    /// Canonical node index.
    pub index: NodeIndex,
    /// Depth in tree (0 = root).
    pub depth: u16,
    /// Whether this node has children in the view.
    pub has_children: bool,
    /// Whether this node is shown expanded.
    pub is_expanded: bool,
    /// Whether the node matched the query.
    pub matched: bool,
}

/// Derived forest produced by [`TreeState::filter`].
///
/// A view never copies node state: it only holds arena indices, so
/// selecting or checking a node found through the view mutates the
/// canonical tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeView {
    /// Root entries in order.
    pub roots: Vec<ViewNode>,
    query: Option<String>,
}

impl TreeView {
    /// The trimmed query this view was built from, `None` for the identity view.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether the view shows nothing.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes in the view, including collapsed ones.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order walk over every entry, collapsed ones included.
    pub fn iter(&self) -> impl Iterator<Item = &ViewNode> {
        let mut stack: Vec<&ViewNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Canonical indices of nodes that matched the query, in pre-order.
    pub fn matches(&self) -> Vec<NodeIndex> {
        self.iter().filter(|n| n.matched).map(|n| n.index).collect()
    }

    /// Find the view entry for a canonical index.
    pub fn find(&self, index: NodeIndex) -> Option<&ViewNode> {
        self.iter().find(|n| n.index == index)
    }

    /// Flatten into render rows, descending only into expanded nodes.
    pub fn rows(&self) -> Vec<FlatNode> {
        let mut out = Vec::new();
        let mut stack: Vec<(&ViewNode, u16)> =
            self.roots.iter().rev().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            let has_children = !node.children.is_empty();
            let is_expanded = has_children && node.expanded;
            out.push(FlatNode {
                index: node.index,
                depth,
                has_children,
                is_expanded,
                matched: node.matched,
            });
            if is_expanded {
                let child_depth = depth.saturating_add(1);
                stack.extend(node.children.iter().rev().map(|c| (c, child_depth)));
            }
        }
        out
    }

    /// Materialize the view as a nested forest using the current canonical state.
    ///
    /// Expansion comes from the view; every other flag from the tree.
    pub fn to_forest(&self, state: &TreeState) -> Vec<TreeNode> {
        let order: Vec<&ViewNode> = self.iter().collect();
        // Walking backwards, each node's built children sit on top of the
        // stack, first child uppermost.
        let mut built: Vec<Option<TreeNode>> = Vec::new();
        for node in order.into_iter().rev() {
            let split = built.len().saturating_sub(node.children.len());
            let children: Vec<TreeNode> = built.drain(split..).rev().flatten().collect();
            built.push(state.get(node.index).cloned().map(|data| TreeNode {
                id: data.id,
                label: data.label,
                children,
                expanded: node.expanded,
                selected: data.selected,
                checked: data.checked,
                indeterminate: data.indeterminate,
                disabled: data.disabled,
                decoration: data.decoration,
            }));
        }
        built.into_iter().rev().flatten().collect()
    }
}

/// Query matcher for one filter pass.
enum QueryMatcher {
    Substring(String),
    Fuzzy {
        pattern: Pattern,
        matcher: Box<Matcher>,
        buf: Vec<char>,
    },
}

impl QueryMatcher {
    fn new(query: &str, mode: SearchMode) -> Self {
        match mode {
            SearchMode::Substring => Self::Substring(query.to_lowercase()),
            SearchMode::Fuzzy => Self::Fuzzy {
                pattern: Pattern::new(
                    query,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                matcher: Box::new(Matcher::new(Config::DEFAULT)),
                buf: Vec::new(),
            },
        }
    }

    fn is_match(&mut self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => text.to_lowercase().contains(needle.as_str()),
            Self::Fuzzy {
                pattern,
                matcher,
                buf,
            } => {
                let haystack = Utf32Str::new(text, buf);
                pattern.score(haystack, matcher).is_some()
            }
        }
    }

    fn matches_node(&mut self, data: &NodeData, key: SearchKey) -> bool {
        if self.is_match(&data.label) {
            return true;
        }
        match (key, &data.decoration.meta) {
            (SearchKey::LabelAndMeta, Some(meta)) => self.is_match(meta),
            _ => false,
        }
    }
}

impl TreeState {
    /// Build a filtered view of the forest.
    ///
    /// A node is kept if its own text matches or any descendant matches.
    /// A matching node keeps its whole subtree. Every node with a matching
    /// descendant is shown expanded; other nodes keep their own flag.
    /// An empty or whitespace-only query yields the unfiltered forest.
    pub fn filter(&self, query: &str) -> TreeView {
        let query = query.trim();
        if query.is_empty() {
            return self.full_view();
        }

        let mut matcher = QueryMatcher::new(query, self.config().search_mode);
        let key = self.config().search_key;
        let order: Vec<NodeIndex> = self.preorder().collect();

        // Top-down: own match, and whether the node sits inside a matched subtree.
        let mut matched = vec![false; self.len()];
        let mut keep_all = vec![false; self.len()];
        for &index in &order {
            let Some(data) = self.get(index) else { continue };
            let i = index.get();
            matched[i] = matcher.matches_node(data, key);
            let inherited = self.parent(index).is_some_and(|p| keep_all[p.get()]);
            keep_all[i] = inherited || matched[i];
        }

        // Bottom-up: whether a subtree contains a match, and the view entries.
        let mut contains = vec![false; self.len()];
        let mut built: Vec<Option<ViewNode>> = (0..self.len()).map(|_| None).collect();
        for &index in order.iter().rev() {
            let i = index.get();
            let mut descendant_matched = false;
            let mut children = Vec::new();
            for &child in self.children(index) {
                descendant_matched |= contains[child.get()];
                children.extend(built[child.get()].take());
            }
            contains[i] = matched[i] || descendant_matched;
            if !keep_all[i] && !descendant_matched {
                continue;
            }
            built[i] = Some(ViewNode {
                index,
                expanded: descendant_matched || self.get(index).is_some_and(|d| d.expanded),
                matched: matched[i],
                children,
            });
        }

        let roots: Vec<ViewNode> = self
            .roots()
            .iter()
            .filter_map(|r| built[r.get()].take())
            .collect();
        debug!("filter '{}' kept {} root(s)", query, roots.len());
        TreeView {
            roots,
            query: Some(query.to_string()),
        }
    }

    /// The identity view: every node, with its own expansion flag.
    pub fn full_view(&self) -> TreeView {
        let mut built: Vec<Option<ViewNode>> = (0..self.len()).map(|_| None).collect();
        let order: Vec<NodeIndex> = self.preorder().collect();
        for &index in order.iter().rev() {
            let children = self
                .children(index)
                .iter()
                .filter_map(|c| built[c.get()].take())
                .collect();
            built[index.get()] = Some(ViewNode {
                index,
                expanded: self.get(index).is_some_and(|d| d.expanded),
                matched: false,
                children,
            });
        }
        TreeView {
            roots: self.roots().iter().filter_map(|r| built[r.get()].take()).collect(),
            query: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::widgets::selection::SelectionMode;

    fn state(config: TreeConfig) -> TreeState {
        TreeState::new(
            vec![
                TreeNode::new("docs", "Documents").with_children(vec![
                    TreeNode::new("report", "Quarterly Report").with_meta("pdf"),
                    TreeNode::new("notes", "Notes"),
                ]),
                TreeNode::new("pics", "Pictures"),
            ],
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_substring_case_insensitive() {
        let state = state(TreeConfig::default());
        let view = state.filter("REPORT");
        assert_eq!(view.len(), 2);
        assert_eq!(view.matches(), vec![state.index_of("report").unwrap()]);
    }

    #[test]
    fn test_meta_search_key() {
        let by_label = state(TreeConfig::default());
        assert!(by_label.filter("pdf").is_empty());

        let by_meta =
            state(TreeConfig::new(SelectionMode::None).search_key(SearchKey::LabelAndMeta));
        assert_eq!(by_meta.filter("pdf").len(), 2);
    }

    #[test]
    fn test_fuzzy_mode() {
        let state = state(TreeConfig::default().search_mode(SearchMode::Fuzzy));
        let view = state.filter("qrtrly");
        assert_eq!(view.matches(), vec![state.index_of("report").unwrap()]);
    }

    #[test]
    fn test_rows_follow_view_expansion() {
        let state = state(TreeConfig::default());
        let rows = state.filter("notes").rows();
        let depths: Vec<u16> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1]);
        assert!(rows[0].is_expanded);
        assert!(rows[1].matched);
    }
}
