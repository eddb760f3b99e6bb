//! Color palette generation.
//!
//! A palette is derived from one base color by mixing it toward white for
//! light levels and toward black for dark levels.

mod shades;

pub use shades::{Palette, SHADE_LEVELS, Shade, generate_shades, parse_hex, try_generate_shades};
