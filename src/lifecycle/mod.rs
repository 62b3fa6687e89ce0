//! Page lifecycle module
//! 
//! The page event queue, the per-page context and the coordinator that
//! sequences timer and overlay transitions.

pub mod coordinator;
pub mod events;
pub mod page;
pub mod status;

// Re-export main types
pub use coordinator::LifecycleCoordinator;
pub use events::{
    event_queue, DetachFlag, EventReceiver, EventSender, EventSource, PageEvent, PointerTarget,
    Subscription,
};
pub use page::PageContext;
pub use status::PageStatus;
