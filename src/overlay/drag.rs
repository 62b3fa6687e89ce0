//! Pointer dragging of the overlay widget

use tracing::debug;

use crate::state::{Position, Size};

/// Widget opacity while it is being dragged
pub const DRAG_OPACITY: f32 = 0.7;

/// Pointer offset from the widget's top-left corner, held while dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Tracks the idle → dragging → idle cycle of the widget header
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Start dragging from a pointer-down at `(x, y)` over the header
    pub fn begin(&mut self, x: f64, y: f64, origin: Position) {
        let session = DragSession {
            offset_x: x - origin.left,
            offset_y: y - origin.top,
        };
        debug!("Drag started with offset ({}, {})", session.offset_x, session.offset_y);
        self.session = Some(session);
    }

    /// Position for a pointer at `(x, y)`, clamped so the widget stays in the viewport.
    ///
    /// Returns `None` while idle.
    pub fn drag_to(&self, x: f64, y: f64, widget: Size, viewport: Size) -> Option<Position> {
        let session = self.session?;
        Some(Position {
            left: clamp_axis(x - session.offset_x, viewport.width - widget.width),
            top: clamp_axis(y - session.offset_y, viewport.height - widget.height),
        })
    }

    /// End the drag. Returns false if no drag was in progress.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.session.take().is_some();
        if was_dragging {
            debug!("Drag ended");
        }
        was_dragging
    }
}

/// Clamp to `[0, max]`; a widget larger than the viewport pins to 0
fn clamp_axis(candidate: f64, max: f64) -> f64 {
    candidate.min(max).max(0.0)
}
