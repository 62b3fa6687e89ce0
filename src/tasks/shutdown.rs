//! Page unload on process shutdown

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tracing::info;

use crate::{
    lifecycle::events::{EventSender, EventSource, PageEvent, Subscription},
    utils::shutdown_signal,
};

/// Delivers [`PageEvent::Unload`] when its trigger completes.
///
/// The default trigger is SIGINT or SIGTERM.
pub struct ShutdownListener {
    trigger: BoxFuture<'static, ()>,
}

impl ShutdownListener {
    pub fn new() -> Self {
        Self::with_trigger(shutdown_signal())
    }

    pub fn with_trigger(trigger: impl Future<Output = ()> + Send + 'static) -> Self {
        Self {
            trigger: trigger.boxed(),
        }
    }
}

impl Default for ShutdownListener {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShutdownListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownListener").finish_non_exhaustive()
    }
}

impl EventSource for ShutdownListener {
    fn name(&self) -> &'static str {
        "shutdown"
    }

    fn subscribe(self, events: EventSender) -> Subscription {
        Subscription::spawn(self.name(), async move {
            self.trigger.await;
            info!("Shutdown signal received, unloading page");
            let _ = events.send(PageEvent::Unload);
        })
    }
}
