//! Timer engine: counters, tick handling and the time-up edge

use tracing::{debug, info};

use crate::{state::TimerState, tasks::TickSource};

/// Outcome of one counted tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The countdown reached zero on this tick
    pub time_up: bool,
}

/// Owns the page's [`TimerState`] and the tick source that advances it
pub struct TimerEngine {
    state: TimerState,
    ticker: Box<dyn TickSource>,
    generation: u64,
    time_up: bool,
}

impl TimerEngine {
    /// Create a stopped engine with a countdown of `limit_seconds`
    pub fn new(limit_seconds: u64, ticker: Box<dyn TickSource>) -> Self {
        Self {
            state: TimerState::new(limit_seconds),
            ticker,
            generation: 0,
            time_up: false,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_active()
    }

    /// Whether the time-up edge has fired and not been cleared
    pub fn is_time_up(&self) -> bool {
        self.time_up
    }

    /// Generation of the current (or last) tick source run
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a new limit.
    ///
    /// A running countdown keeps its relative progress; a stopped one is put
    /// back to its initial values under the new limit.
    pub fn configure(&mut self, limit_seconds: u64) {
        if self.is_running() {
            let before = self.state.remaining_seconds;
            self.state.rescale(limit_seconds);
            info!(
                "Time limit changed to {}s, remaining rescaled {}s -> {}s",
                limit_seconds, before, self.state.remaining_seconds
            );
        } else {
            self.state.limit_seconds = limit_seconds;
            self.state.reset_counters();
            debug!("Time limit set to {}s", limit_seconds);
        }

        if self.state.remaining_seconds > 0 {
            self.time_up = false;
        }
    }

    /// Start ticking; no-op while already running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.generation += 1;
        self.ticker.start(self.generation);
    }

    /// Cancel the tick and return the counters to their initial values
    pub fn stop(&mut self) {
        self.cancel();
        self.state.reset_counters();
        self.time_up = false;
    }

    /// Cancel the tick without touching the counters
    pub fn cancel(&mut self) {
        self.ticker.cancel();
    }

    pub fn pause(&mut self) {
        if !self.state.paused {
            debug!("Timer paused");
        }
        self.state.paused = true;
    }

    pub fn resume(&mut self) {
        if self.state.paused {
            debug!("Timer resumed");
        }
        self.state.paused = false;
    }

    /// Handle a tick from the tick source.
    ///
    /// Returns `None` when the tick has no effect: the engine is stopped or
    /// paused, or the tick belongs to a cancelled run.
    pub fn on_tick(&mut self, generation: u64) -> Option<TickReport> {
        if !self.is_running() || generation != self.generation {
            debug!("Ignoring stale tick (generation {})", generation);
            return None;
        }
        if self.state.paused {
            return None;
        }
        Some(self.tick())
    }

    fn tick(&mut self) -> TickReport {
        self.state.elapsed_seconds += 1;
        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
        }

        let time_up = self.state.is_expired() && !self.time_up;
        if time_up {
            self.time_up = true;
            info!(
                "Time limit reached after {}s",
                self.state.elapsed_seconds
            );
        }
        TickReport { time_up }
    }

    /// Reset the countdown.
    ///
    /// With `keep_elapsed` this is a snooze: a fresh countdown window with the
    /// accumulated elapsed time preserved.
    pub fn reset(&mut self, keep_elapsed: bool) {
        if keep_elapsed {
            self.state.refill();
        } else {
            self.state.reset_counters();
        }
        self.time_up = false;
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("running", &self.is_running())
            .field("generation", &self.generation)
            .field("time_up", &self.time_up)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::ManualTicker;

    fn running_engine(limit_seconds: u64) -> TimerEngine {
        let mut engine = TimerEngine::new(limit_seconds, Box::new(ManualTicker::new()));
        engine.start();
        engine
    }

    fn deliver(engine: &mut TimerEngine, ticks: usize) -> Vec<TickReport> {
        let generation = engine.generation();
        (0..ticks)
            .filter_map(|_| engine.on_tick(generation))
            .collect()
    }

    #[test]
    fn time_up_fires_once_on_last_tick() {
        let mut engine = running_engine(5);

        let reports = deliver(&mut engine, 5);
        assert_eq!(engine.state().elapsed_seconds, 5);
        assert_eq!(engine.state().remaining_seconds, 0);

        let fired: Vec<usize> = reports
            .iter()
            .enumerate()
            .filter(|(_, r)| r.time_up)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(fired, vec![5]);

        let later = deliver(&mut engine, 3);
        assert!(later.iter().all(|r| !r.time_up));
        assert_eq!(engine.state().elapsed_seconds, 8);
        assert_eq!(engine.state().remaining_seconds, 0);
    }

    #[test]
    fn zero_limit_fires_on_first_tick() {
        let mut engine = running_engine(0);
        let reports = deliver(&mut engine, 2);
        assert_eq!(reports[0], TickReport { time_up: true });
        assert_eq!(reports[1], TickReport { time_up: false });
    }

    #[test]
    fn paused_ticks_have_no_effect() {
        let mut engine = running_engine(10);
        engine.pause();
        assert!(deliver(&mut engine, 3).is_empty());
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert!(engine.is_running());

        engine.resume();
        deliver(&mut engine, 2);
        assert_eq!(engine.state().elapsed_seconds, 2);
        assert_eq!(engine.state().remaining_seconds, 8);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut engine = running_engine(10);
        let old = engine.generation();

        engine.stop();
        engine.start();
        assert!(engine.on_tick(old).is_none());
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn stopped_engine_ignores_ticks() {
        let mut engine = TimerEngine::new(10, Box::new(ManualTicker::new()));
        assert!(engine.on_tick(engine.generation()).is_none());
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = running_engine(10);
        let generation = engine.generation();
        engine.start();
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn stop_restores_initial_values() {
        let mut engine = running_engine(10);
        deliver(&mut engine, 4);
        engine.stop();
        engine.stop();

        assert!(!engine.is_running());
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().remaining_seconds, 10);
    }

    #[test]
    fn doubling_limit_never_shrinks_remaining() {
        for ticks in 0..10 {
            let mut engine = running_engine(10);
            deliver(&mut engine, ticks);
            let before = engine.state().remaining_seconds;

            engine.configure(20);
            assert!(engine.state().remaining_seconds >= before);
        }
    }

    #[test]
    fn configure_clears_time_up_when_time_is_left() {
        let mut engine = running_engine(4);
        deliver(&mut engine, 2);
        engine.configure(2);
        deliver(&mut engine, 1);
        assert!(engine.is_time_up());

        // Remaining is already 0, so rescaling keeps it at 0.
        engine.configure(100);
        assert_eq!(engine.state().remaining_seconds, 0);
        assert!(engine.is_time_up());

        engine.reset(true);
        assert!(!engine.is_time_up());
        engine.configure(200);
        assert!(engine.state().remaining_seconds > 0);
        assert!(!engine.is_time_up());
    }

    #[test]
    fn configure_while_stopped_resets_to_new_limit() {
        let mut engine = TimerEngine::new(10, Box::new(ManualTicker::new()));
        engine.configure(90);
        assert_eq!(engine.state().remaining_seconds, 90);
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn snooze_keeps_elapsed() {
        let mut engine = running_engine(3);
        deliver(&mut engine, 5);
        assert!(engine.is_time_up());

        engine.reset(true);
        assert_eq!(engine.state().elapsed_seconds, 5);
        assert_eq!(engine.state().remaining_seconds, 3);
        assert!(!engine.is_time_up());

        let reports = deliver(&mut engine, 3);
        assert!(reports[2].time_up);
    }

    #[test]
    fn full_reset_zeroes_elapsed() {
        let mut engine = running_engine(3);
        deliver(&mut engine, 5);

        engine.reset(false);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().remaining_seconds, 3);
        assert!(engine.is_running());
    }
}
