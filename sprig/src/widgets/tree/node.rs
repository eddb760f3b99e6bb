//! Nested node representation supplied by (and returned to) the caller.

use serde::{Deserialize, Serialize};

/// Stable identifier of a tree node.
///
/// Accepts either an integer or a string, so JSON such as `{"id": 3}` and
/// `{"id": "docs"}` both deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Integers become [`NodeId::Int`], anything else [`NodeId::Str`].
impl std::str::FromStr for NodeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(value) => Self::Int(value),
            Err(_) => Self::Str(s.to_string()),
        })
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&NodeId> for NodeId {
    fn from(value: &NodeId) -> Self {
        value.clone()
    }
}

/// Presentation-only fields. The tree carries them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDecoration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// One item of a caller-supplied forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub indeterminate: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(flatten)]
    pub decoration: NodeDecoration,
}

impl TreeNode {
    /// Create a collapsed, unselected leaf.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            expanded: false,
            selected: false,
            checked: false,
            indeterminate: false,
            disabled: false,
            decoration: NodeDecoration::default(),
        }
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Append one child.
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Start expanded.
    pub fn expanded(mut self) -> Self {
        self.expanded = true;
        self
    }

    /// Start selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Start checked.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Mark as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the icon decoration.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.decoration.icon = Some(icon.into());
        self
    }

    /// Set the meta decoration (secondary text, optionally searchable).
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.decoration.meta = Some(meta.into());
        self
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        let mut stack = vec![self];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}
