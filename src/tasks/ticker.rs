//! Cancellable one-second tick source

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::lifecycle::events::{EventSender, PageEvent};

/// Period of the timer tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A recurring tick that can be started and cancelled
pub trait TickSource: Send {
    /// Begin ticking; every tick carries `generation`
    fn start(&mut self, generation: u64);

    /// Stop ticking. Safe to call when not running.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

/// Tick source backed by a tokio interval that feeds the page event queue
#[derive(Debug)]
pub struct IntervalTicker {
    events: EventSender,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTicker {
    pub fn new(events: EventSender) -> Self {
        Self::with_period(events, TICK_INTERVAL)
    }

    pub fn with_period(events: EventSender, period: Duration) -> Self {
        Self {
            events,
            period,
            handle: None,
        }
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self, generation: u64) {
        if self.is_active() {
            return;
        }

        info!("Starting tick source (generation {})", generation);
        let events = self.events.clone();
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            // First tick one full period after start, not immediately.
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if events.send(PageEvent::Tick { generation }).is_err() {
                    debug!("Event queue closed, tick source exiting");
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Tick source cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Tick source driven by hand, for embedders that deliver ticks themselves
#[derive(Debug, Default)]
pub struct ManualTicker {
    generation: Option<u64>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self, generation: u64) {
        if self.generation.is_none() {
            self.generation = Some(generation);
        }
    }

    fn cancel(&mut self) {
        self.generation = None;
    }

    fn is_active(&self) -> bool {
        self.generation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::events::event_queue;

    #[tokio::test(start_paused = true)]
    async fn emits_ticks_with_generation() {
        let (tx, mut rx) = event_queue();
        let mut ticker = IntervalTicker::new(tx);

        ticker.start(3);
        assert!(ticker.is_active());

        let started = Instant::now();
        assert_eq!(rx.recv().await, Some(PageEvent::Tick { generation: 3 }));
        assert!(started.elapsed() >= TICK_INTERVAL);
        assert_eq!(rx.recv().await, Some(PageEvent::Tick { generation: 3 }));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent_and_cancel_stops() {
        let (tx, mut rx) = event_queue();
        let mut ticker = IntervalTicker::new(tx);

        ticker.start(1);
        ticker.start(2);
        assert_eq!(rx.recv().await, Some(PageEvent::Tick { generation: 1 }));

        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());

        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(next.is_err(), "no ticks after cancel");
    }

    #[test]
    fn manual_ticker_tracks_activity() {
        let mut ticker = ManualTicker::new();
        assert!(!ticker.is_active());
        ticker.start(1);
        assert!(ticker.is_active());
        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());
    }
}
