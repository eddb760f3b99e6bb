//! Bottom sheet state.

use log::debug;

use crate::config::SheetConfig;

/// Pointer positions of an active drag, in the host's vertical axis
/// (larger = further down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetDrag {
    /// Pointer position when the drag started.
    pub start_y: f32,
    /// Last recorded pointer position.
    pub last_y: f32,
}

/// What a released drag did to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// Dragged past the threshold; the sheet is now closed.
    Closed,
    /// Released above the threshold; the sheet snapped back open.
    Restored,
    /// No drag was active.
    Ignored,
}

/// A draggable bottom sheet.
#[derive(Debug, Clone)]
pub struct BottomSheet {
    config: SheetConfig,
    open: bool,
    /// Full height of the sheet when open.
    height: f32,
    /// Current downward translation caused by dragging (always >= 0).
    offset: f32,
    drag: Option<SheetDrag>,
}

impl BottomSheet {
    /// Create a closed sheet of the given height.
    pub fn new(height: f32, config: SheetConfig) -> Self {
        Self {
            config,
            open: false,
            height: height.max(0.0),
            offset: 0.0,
            drag: None,
        }
    }

    /// Show the sheet.
    pub fn open(&mut self) {
        self.open = true;
        self.offset = 0.0;
        self.drag = None;
    }

    /// Hide the sheet and cancel any drag.
    pub fn close(&mut self) {
        self.open = false;
        self.offset = 0.0;
        self.drag = None;
    }

    /// Whether the sheet is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Full height of the sheet.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Update the sheet height (e.g. after a layout pass).
    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
        self.offset = self.offset.min(self.height);
    }

    /// Current downward translation.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Part of the sheet still on screen.
    pub fn visible_height(&self) -> f32 {
        if self.open {
            (self.height - self.offset).max(0.0)
        } else {
            0.0
        }
    }

    /// Begin dragging at pointer position `y`. Ignored while closed.
    pub fn start_drag(&mut self, y: f32) -> bool {
        if !self.open {
            return false;
        }
        self.drag = Some(SheetDrag {
            start_y: y,
            last_y: y,
        });
        true
    }

    /// Move the pointer to `y`, returning the new offset.
    ///
    /// Dragging above the start position does not lift the sheet past
    /// fully open; the offset is clamped to `0.0..=height`.
    pub fn drag_to(&mut self, y: f32) -> Option<f32> {
        let drag = self.drag.as_mut()?;
        drag.last_y = y;
        self.offset = (y - drag.start_y).clamp(0.0, self.height);
        Some(self.offset)
    }

    /// Release the drag and settle the sheet.
    pub fn end_drag(&mut self) -> SheetOutcome {
        let Some(drag) = self.drag.take() else {
            return SheetOutcome::Ignored;
        };
        let limit = self.height * self.config.close_threshold;
        debug!(
            "sheet released after {:.1} (offset {:.1}, limit {:.1})",
            drag.last_y - drag.start_y,
            self.offset,
            limit
        );
        if self.offset > limit {
            self.close();
            SheetOutcome::Closed
        } else {
            self.offset = 0.0;
            SheetOutcome::Restored
        }
    }
}
