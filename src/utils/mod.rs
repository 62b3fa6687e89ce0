//! Utility functions module
//! 
//! Time formatting helpers and OS signal handling shared by the core and the
//! headless host binary.

pub mod signals;
pub mod time_format;

// Re-export main functions
pub use signals::shutdown_signal;
pub use time_format::{format_time, parse_time_limit};
