//! Bottom sheet drag tracking.
//!
//! ## Usage
//!
//! 1) Open the sheet with [`BottomSheet::open`].
//! 2) On pointer down over the handle, call [`BottomSheet::start_drag`].
//! 3) On each pointer move, call [`BottomSheet::drag_to`] and translate the
//!    sheet down by the returned offset.
//! 4) On pointer up, call [`BottomSheet::end_drag`]; it either closes the
//!    sheet or snaps it back.

mod state;

pub use state::{BottomSheet, SheetDrag, SheetOutcome};
