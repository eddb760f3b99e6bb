pub mod color;
pub mod config;
pub mod error;
pub mod widgets;

pub mod prelude {
    pub use crate::color::{Palette, SHADE_LEVELS, Shade, generate_shades, try_generate_shades};
    pub use crate::config::{
        SearchKey, SearchMode, SheetConfig, SnackbarConfig, SprigConfig, TreeConfig,
    };
    pub use crate::error::{ColorError, TreeError};
    pub use crate::widgets::{BottomSheet, SheetOutcome};
    pub use crate::widgets::{EventQueue, SelectionMode};
    pub use crate::widgets::{Snackbar, SnackbarEvent, SnackbarId, SnackbarLevel, SnackbarQueue};
    pub use crate::widgets::{
        FlatNode, NodeData, NodeId, NodeIndex, Tree, TreeEvent, TreeId, TreeNode, TreeState,
        TreeView, ViewNode,
    };
}
