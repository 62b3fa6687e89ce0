//! Page events and event-source subscriptions
//!
//! Every external signal reaches the coordinator as a [`PageEvent`] on one
//! unbounded queue, so handlers never run concurrently.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error};

use crate::settings::StoreChange;

/// Part of the page a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The widget's header, which acts as the drag handle
    Header,
    /// Any other part of the widget
    Widget,
    /// Page content outside the widget
    Page,
}

/// A single input to the page state machine
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// One second elapsed on the tick source started under `generation`
    Tick { generation: u64 },
    StoreChanged(StoreChange),
    VisibilityChanged { hidden: bool },
    /// The document mutated; `href` is the location at that moment
    UrlMutation { href: String },
    PointerDown { x: f64, y: f64, target: PointerTarget },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    ResetClicked,
    SnoozeClicked,
    StatusRequested,
    Unload,
}

/// Sending half of the page event queue
pub type EventSender = mpsc::UnboundedSender<PageEvent>;

/// Receiving half of the page event queue
pub type EventReceiver = mpsc::UnboundedReceiver<PageEvent>;

/// Create the page event queue
pub fn event_queue() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// A producer of page events that runs until detached
pub trait EventSource {
    fn name(&self) -> &'static str;

    /// Start producing events into `events`
    fn subscribe(self, events: EventSender) -> Subscription;
}

/// Set once a thread-backed producer has been detached
pub type DetachFlag = Arc<AtomicBool>;

#[derive(Debug)]
enum Producer {
    Task(JoinHandle<()>),
    Thread(DetachFlag),
}

/// Handle to an attached event source
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    producer: Option<Producer>,
}

impl Subscription {
    /// Run `producer` as a background task owned by this subscription
    pub fn spawn<F>(name: &'static str, producer: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            producer: Some(Producer::Task(tokio::spawn(producer))),
        }
    }

    /// Run a blocking `producer` on its own OS thread.
    ///
    /// The thread is never joined. After `detach` it must stop forwarding
    /// events once its flag reads true; a read it is blocked in may outlive
    /// the subscription without holding up the runtime.
    pub fn spawn_thread<F>(name: &'static str, producer: F) -> Self
    where
        F: FnOnce(DetachFlag) + Send + 'static,
    {
        let detached = DetachFlag::default();
        let flag = detached.clone();
        match thread::Builder::new()
            .name(name.to_string())
            .spawn(move || producer(flag))
        {
            Ok(_) => Self {
                name,
                producer: Some(Producer::Thread(detached)),
            },
            Err(e) => {
                error!("Failed to start event source {}: {}", name, e);
                Self {
                    name,
                    producer: None,
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_attached(&self) -> bool {
        self.producer.is_some()
    }

    /// Stop the producer. Returns false if it was already detached.
    pub fn detach(&mut self) -> bool {
        match self.producer.take() {
            Some(Producer::Task(handle)) => handle.abort(),
            Some(Producer::Thread(detached)) => detached.store(true, Ordering::SeqCst),
            None => return false,
        }
        debug!("Detached event source {}", self.name);
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
