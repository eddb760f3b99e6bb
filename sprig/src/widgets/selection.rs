//! Shared selection types for tree-like widgets.

use serde::{Deserialize, Serialize};

/// How a widget reacts to node clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// At most one node selected across the whole widget (radio-button style).
    Single,
    /// Each node toggles independently.
    Multiple,
    /// Tri-state checkboxes that cascade to descendants.
    Checkbox,
}

impl SelectionMode {
    /// Whether `select` calls have any effect in this mode.
    pub fn allows_selection(self) -> bool {
        matches!(self, Self::Single | Self::Multiple)
    }

    /// Whether check state is tracked in this mode.
    pub fn is_checkbox(self) -> bool {
        self == Self::Checkbox
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multiple => "multiple",
            Self::Checkbox => "checkbox",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "multiple" | "multi" => Ok(Self::Multiple),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(format!("unknown selection mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("single".parse::<SelectionMode>(), Ok(SelectionMode::Single));
        assert_eq!("Multi".parse::<SelectionMode>(), Ok(SelectionMode::Multiple));
        assert_eq!(" checkbox ".parse::<SelectionMode>(), Ok(SelectionMode::Checkbox));
        assert!("radio".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_allows_selection() {
        assert!(!SelectionMode::None.allows_selection());
        assert!(SelectionMode::Single.allows_selection());
        assert!(SelectionMode::Multiple.allows_selection());
        assert!(!SelectionMode::Checkbox.allows_selection());
    }
}
