//! Overlay widget view model

use serde::Serialize;

use crate::utils::format_time;

/// Text of the warning shown when the countdown runs out
pub const TIME_UP_MESSAGE: &str = "Time limit reached!";

/// Initial top-left corner of a freshly created widget
pub const DEFAULT_POSITION: Position = Position { left: 20.0, top: 20.0 };

/// Top-left corner in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything the host needs to paint the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayWidget {
    pub visible: bool,
    pub position: Position,
    pub opacity: f32,
    pub elapsed_text: String,
    pub remaining_text: String,
    /// Present while the time-up warning is shown
    pub warning: Option<String>,
    /// Whether the reset and snooze buttons are shown
    pub controls_visible: bool,
}

impl OverlayWidget {
    /// Create a visible widget at the default position
    pub fn new(elapsed_seconds: u64, remaining_seconds: u64) -> Self {
        Self {
            visible: true,
            position: DEFAULT_POSITION,
            opacity: 1.0,
            elapsed_text: format_time(elapsed_seconds),
            remaining_text: format_time(remaining_seconds),
            warning: None,
            controls_visible: false,
        }
    }

    pub fn set_counters(&mut self, elapsed_seconds: u64, remaining_seconds: u64) {
        self.elapsed_text = format_time(elapsed_seconds);
        self.remaining_text = format_time(remaining_seconds);
    }

    pub fn has_warning(&self) -> bool {
        self.warning.is_some()
    }
}
