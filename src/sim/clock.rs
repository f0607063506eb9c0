//! Pause-aware wall-clock accounting
//!
//! Time-gated behaviour (chaser activation, the level countdown) measures
//! elapsed time net of every paused interval. Timestamps are host-supplied
//! milliseconds from a monotonic clock.

/// Elapsed-time tracker that excludes paused intervals
///
/// At most one pause interval is open at a time: entering a pause while
/// already paused keeps the first entry time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseClock {
    start_time: u64,
    accumulated_paused: u64,
    /// Entry time of the open pause interval, if any
    pause_entry: Option<u64>,
}

impl PauseClock {
    pub fn new(start_time: u64) -> Self {
        Self {
            start_time,
            accumulated_paused: 0,
            pause_entry: None,
        }
    }

    /// Restart the clock at `now` with no paused time
    pub fn reset(&mut self, now: u64) {
        *self = Self::new(now);
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    /// Total length of the closed pause intervals
    pub fn accumulated_paused(&self) -> u64 {
        self.accumulated_paused
    }

    pub fn is_paused(&self) -> bool {
        self.pause_entry.is_some()
    }

    /// Open a pause interval (no-op if one is already open)
    pub fn enter_pause(&mut self, now: u64) {
        if self.pause_entry.is_none() {
            self.pause_entry = Some(now);
        }
    }

    /// Close the open pause interval (no-op if none is open)
    pub fn exit_pause(&mut self, now: u64) {
        if let Some(entry) = self.pause_entry.take() {
            self.accumulated_paused += now.saturating_sub(entry);
        }
    }

    /// Live time since start; frozen while a pause is open
    pub fn effective_elapsed(&self, now: u64) -> u64 {
        let now = self.pause_entry.unwrap_or(now);
        now.saturating_sub(self.start_time)
            .saturating_sub(self.accumulated_paused)
    }
}

/// Countdown for one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTimer {
    pub clock: PauseClock,
    pub limit_ms: u64,
}

impl LevelTimer {
    pub fn new(now: u64, limit_ms: u64) -> Self {
        Self {
            clock: PauseClock::new(now),
            limit_ms,
        }
    }

    pub fn expired(&self, now: u64) -> bool {
        self.clock.effective_elapsed(now) >= self.limit_ms
    }

    /// Whole seconds left, rounded up (what the HUD shows)
    pub fn remaining_secs(&self, now: u64) -> u64 {
        let left = self.limit_ms.saturating_sub(self.clock.effective_elapsed(now));
        left.div_ceil(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_without_pauses() {
        let clock = PauseClock::new(1_000);
        assert_eq!(clock.effective_elapsed(1_000), 0);
        assert_eq!(clock.effective_elapsed(4_500), 3_500);
    }

    #[test]
    fn test_pause_freezes_and_subtracts() {
        let mut clock = PauseClock::new(0);
        clock.enter_pause(2_000);
        assert!(clock.is_paused());
        assert_eq!(clock.effective_elapsed(9_000), 2_000);

        clock.exit_pause(5_000);
        assert!(!clock.is_paused());
        assert_eq!(clock.accumulated_paused(), 3_000);
        assert_eq!(clock.effective_elapsed(6_000), 3_000);
    }

    #[test]
    fn test_reentering_pause_keeps_first_entry() {
        let mut clock = PauseClock::new(0);
        clock.enter_pause(100);
        clock.enter_pause(400);
        clock.exit_pause(1_000);
        assert_eq!(clock.accumulated_paused(), 900);

        // Exiting without an open interval changes nothing
        clock.exit_pause(2_000);
        assert_eq!(clock.accumulated_paused(), 900);
    }

    #[test]
    fn test_reset_clears_paused_time() {
        let mut clock = PauseClock::new(0);
        clock.enter_pause(10);
        clock.exit_pause(60);
        clock.enter_pause(100);
        clock.reset(500);
        assert_eq!(clock, PauseClock::new(500));
        assert_eq!(clock.accumulated_paused(), 0);
    }

    #[test]
    fn test_level_timer_countdown() {
        let mut timer = LevelTimer::new(0, 30_000);
        assert_eq!(timer.remaining_secs(0), 30);
        assert_eq!(timer.remaining_secs(1), 30);
        assert_eq!(timer.remaining_secs(1_000), 29);

        timer.clock.enter_pause(10_000);
        timer.clock.exit_pause(40_000);
        assert!(!timer.expired(59_999));
        assert!(timer.expired(60_000));
        assert_eq!(timer.remaining_secs(60_000), 0);
    }
}
