//! Snackbar notifications.
//!
//! The queue is owned by the application shell and passed to whoever needs
//! to notify, instead of living in a global. One snackbar is visible at a
//! time; the rest wait in FIFO order.
//!
//! # Example
//!
//! ```ignore
//! let mut snackbars = SnackbarQueue::new(SnackbarConfig::default());
//! snackbars.show(Snackbar::success("Saved").with_action("Undo"));
//!
//! // on every frame / timer tick:
//! snackbars.tick(Instant::now());
//! if let Some(active) = snackbars.visible() {
//!     // render active.snackbar.message ...
//! }
//! ```

mod item;
mod state;

pub use item::{Snackbar, SnackbarLevel};
pub use state::{ActiveSnackbar, DismissReason, SnackbarEvent, SnackbarId, SnackbarQueue};
