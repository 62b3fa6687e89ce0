//! Per-page singleton holding the timer and the overlay

use crate::{
    overlay::{HostDocument, OverlayController},
    tasks::TickSource,
    timer::{TickReport, TimerEngine},
};

/// The one timer and the one overlay of a page, created once per page
#[derive(Debug)]
pub struct PageContext {
    pub engine: TimerEngine,
    pub overlay: OverlayController,
}

impl PageContext {
    pub fn new(
        limit_seconds: u64,
        ticker: Box<dyn TickSource>,
        document: Box<dyn HostDocument>,
    ) -> Self {
        Self {
            engine: TimerEngine::new(limit_seconds, ticker),
            overlay: OverlayController::new(document),
        }
    }

    pub fn show_and_start(&mut self) {
        self.overlay.show_and_start(&mut self.engine);
    }

    pub fn hide_and_reset(&mut self) {
        self.overlay.hide_and_reset(&mut self.engine);
    }

    /// Advance the timer and repaint; escalates to the warning on the time-up edge
    pub fn tick(&mut self, generation: u64) -> Option<TickReport> {
        let report = self.engine.on_tick(generation)?;
        self.overlay.on_tick(self.engine.state());
        if report.time_up {
            self.overlay.on_time_up();
        }
        Some(report)
    }

    /// Reset (`keep_elapsed == false`) or snooze the countdown and clear the warning
    pub fn reset(&mut self, keep_elapsed: bool) {
        self.engine.reset(keep_elapsed);
        self.overlay.clear_warning();
        self.overlay.on_tick(self.engine.state());
    }

    /// Apply a new time limit to the running or idle timer
    pub fn configure(&mut self, limit_seconds: u64) {
        self.engine.configure(limit_seconds);
        if self.engine.state().remaining_seconds > 0 {
            self.overlay.clear_warning();
        }
        self.overlay.on_tick(self.engine.state());
    }
}
