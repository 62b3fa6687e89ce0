//! State management module
//! 
//! Plain data owned by the timer engine and the overlay controller.

pub mod timer_state;
pub mod widget_state;

// Re-export main types
pub use timer_state::TimerState;
pub use widget_state::{OverlayWidget, Position, Size};
