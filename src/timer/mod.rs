//! Page timer
//! 
//! The engine that advances elapsed and remaining counters once per tick.

pub mod engine;

// Re-export main types
pub use engine::{TickReport, TimerEngine};
