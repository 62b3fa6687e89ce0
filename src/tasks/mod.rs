//! Background tasks module
//! 
//! Producers that feed the page event queue: the tick source, the settings
//! store poller, the stdin host reader and the shutdown listener.

pub mod host_input;
pub mod shutdown;
pub mod store_watcher;
pub mod ticker;

// Re-export main types
pub use host_input::HostInput;
pub use shutdown::ShutdownListener;
pub use store_watcher::StoreWatcher;
pub use ticker::{IntervalTicker, ManualTicker, TickSource, TICK_INTERVAL};
