//! Snackbar content.

use std::time::Duration;

/// Snackbar level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnackbarLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A snackbar notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    /// Message to display (single line)
    pub message: String,
    /// Optional action button label
    pub action: Option<String>,
    /// Snackbar level (affects styling)
    pub level: SnackbarLevel,
    /// How long to show the snackbar (`None` = queue default)
    pub duration: Option<Duration>,
}

impl Snackbar {
    fn with_level(message: impl Into<String>, level: SnackbarLevel) -> Self {
        Self {
            message: message.into(),
            action: None,
            level,
            duration: None,
        }
    }

    /// Create a simple info snackbar
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, SnackbarLevel::Info)
    }

    /// Create an error snackbar
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(message, SnackbarLevel::Error)
    }

    /// Create a success snackbar
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, SnackbarLevel::Success)
    }

    /// Create a warning snackbar
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, SnackbarLevel::Warning)
    }

    /// Add an action button
    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action = Some(label.into());
        self
    }

    /// Set custom duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl From<String> for Snackbar {
    fn from(message: String) -> Self {
        Snackbar::info(message)
    }
}

impl From<&str> for Snackbar {
    fn from(message: &str) -> Self {
        Snackbar::info(message)
    }
}
