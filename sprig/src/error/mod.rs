//! Error types

mod color;
mod tree;

pub use color::*;
pub use tree::*;
