//! Component configuration types.
//!
//! Every config is a plain builder-style struct that can also be
//! deserialized, so a host application can keep them in a settings file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::widgets::SelectionMode;

/// How search queries are matched against nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Fuzzy match (characters in order, gaps allowed).
    Fuzzy,
}

/// Which node text a search query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKey {
    /// Only the node label.
    #[default]
    Label,
    /// The label, then the `meta` decoration if present.
    LabelAndMeta,
}

/// Per-tree configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// How clicks affect `selected` / `checked`.
    pub selection_mode: SelectionMode,

    /// Matching strategy for [`TreeState::filter`](crate::widgets::TreeState::filter).
    pub search_mode: SearchMode,

    /// Text searched by the filter.
    pub search_key: SearchKey,

    /// If true, clicking a node with children also toggles its expansion.
    pub expand_on_click: bool,
}

impl TreeConfig {
    /// Create a config with the given selection mode.
    pub fn new(selection_mode: SelectionMode) -> Self {
        Self {
            selection_mode,
            ..Default::default()
        }
    }

    /// Set the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Set the search mode.
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Set the search key.
    pub fn search_key(mut self, key: SearchKey) -> Self {
        self.search_key = key;
        self
    }

    /// Toggle expansion on click.
    pub fn expand_on_click(mut self) -> Self {
        self.expand_on_click = true;
        self
    }
}

/// Default time a snackbar stays visible.
pub const DEFAULT_SNACKBAR_DURATION_MS: u64 = 4000;

/// Default number of snackbars allowed to wait behind the visible one.
pub const DEFAULT_SNACKBAR_CAPACITY: usize = 8;

/// Snackbar queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnackbarConfig {
    /// Maximum number of queued (not yet visible) snackbars. Zero acts as one.
    pub capacity: usize,

    /// Visible time for snackbars without an explicit duration.
    pub default_duration_ms: u64,
}

impl Default for SnackbarConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_SNACKBAR_CAPACITY,
            default_duration_ms: DEFAULT_SNACKBAR_DURATION_MS,
        }
    }
}

impl SnackbarConfig {
    /// Set the queue capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the default visible duration.
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Default visible duration as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

/// Default fraction of the sheet height that must be dragged to close it.
pub const DEFAULT_CLOSE_THRESHOLD: f32 = 0.25;

/// Bottom sheet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Fraction (0.0 - 1.0) of the sheet height past which a release closes it.
    pub close_threshold: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
        }
    }
}

impl SheetConfig {
    /// Set the close threshold, clamped to `0.0..=1.0`.
    pub fn close_threshold(mut self, threshold: f32) -> Self {
        self.close_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// Combined configuration document, e.g. loaded from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprigConfig {
    pub tree: TreeConfig,
    pub snackbar: SnackbarConfig,
    pub sheet: SheetConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snackbar_default_duration() {
        let config = SnackbarConfig::default();
        assert_eq!(config.duration(), Duration::from_secs(4));
    }

    #[test]
    fn test_sheet_threshold_clamped() {
        assert_eq!(SheetConfig::default().close_threshold(3.0).close_threshold, 1.0);
        assert_eq!(SheetConfig::default().close_threshold(-1.0).close_threshold, 0.0);
    }

    #[test]
    fn test_tree_config_builder() {
        let config = TreeConfig::new(SelectionMode::Checkbox)
            .search_mode(SearchMode::Fuzzy)
            .expand_on_click();
        assert_eq!(config.selection_mode, SelectionMode::Checkbox);
        assert_eq!(config.search_mode, SearchMode::Fuzzy);
        assert_eq!(config.search_key, SearchKey::Label);
        assert!(config.expand_on_click);
    }
}
