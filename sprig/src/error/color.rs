//! Color error types

/// Errors that can occur when parsing a base color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The input is not a `#RGB` / `#RRGGBB` hex color.
    #[error("Invalid hex color '{input}': {reason}")]
    InvalidHex { input: String, reason: String },
}

impl ColorError {
    /// Creates a new invalid-hex error.
    pub fn invalid_hex(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHex {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
