//! Timer counters for the tracked page

use serde::Serialize;

/// Elapsed and remaining counters of the page timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub paused: bool,
    pub limit_seconds: u64,
}

impl TimerState {
    /// Create a timer state at its initial values for `limit_seconds`
    pub fn new(limit_seconds: u64) -> Self {
        Self {
            elapsed_seconds: 0,
            remaining_seconds: limit_seconds,
            paused: false,
            limit_seconds,
        }
    }

    /// Return both counters to their initial values
    pub fn reset_counters(&mut self) {
        self.elapsed_seconds = 0;
        self.remaining_seconds = self.limit_seconds;
    }

    /// Grant a full countdown window while keeping elapsed time
    pub fn refill(&mut self) {
        self.remaining_seconds = self.limit_seconds;
    }

    /// Scale the remaining time onto `new_limit`, keeping the fraction still left.
    ///
    /// The fraction is taken against `elapsed + remaining`, which only equals the
    /// previous limit when no snooze happened in between.
    pub fn rescale(&mut self, new_limit: u64) {
        let total = u128::from(self.elapsed_seconds) + u128::from(self.remaining_seconds);
        self.remaining_seconds = if total == 0 {
            0
        } else {
            let scaled = u128::from(new_limit) * u128::from(self.remaining_seconds);
            // Round half up.
            u64::try_from((2 * scaled + total) / (2 * total)).unwrap_or(u64::MAX)
        };
        self.limit_seconds = new_limit;
    }

    /// Check if the countdown has run out
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_keeps_fraction_left() {
        let mut state = TimerState::new(100);
        state.elapsed_seconds = 25;
        state.remaining_seconds = 75;

        state.rescale(200);
        assert_eq!(state.remaining_seconds, 150);
        assert_eq!(state.limit_seconds, 200);
        assert_eq!(state.elapsed_seconds, 25);
    }

    #[test]
    fn rescale_rounds_to_nearest() {
        let mut state = TimerState::new(3);
        state.elapsed_seconds = 1;
        state.remaining_seconds = 2;

        // 10 * 2 / 3 = 6.67
        state.rescale(10);
        assert_eq!(state.remaining_seconds, 7);
    }

    #[test]
    fn rescale_of_empty_state_is_zero() {
        let mut state = TimerState::new(0);
        state.rescale(60);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.limit_seconds, 60);
    }

    #[test]
    fn rescale_after_snooze_uses_elapsed_plus_remaining() {
        let mut state = TimerState::new(10);
        state.elapsed_seconds = 30;
        state.remaining_seconds = 10;

        state.rescale(20);
        assert_eq!(state.remaining_seconds, 5);
    }
}
