//! On-page overlay
//! 
//! The widget controller, its drag handling and the host document it paints into.

pub mod controller;
pub mod document;
pub mod drag;

// Re-export main types
pub use controller::OverlayController;
pub use document::{HeadlessDocument, HostDocument, WIDGET_CLASS};
pub use drag::{DragController, DragSession};
