//! Deferred state transitions
//!
//! The UI loop is single-threaded and polls deadlines instead of spawning
//! timer tasks. Each concern owns exactly one [`TimerSlot`]; arming a slot
//! replaces whatever deadline it held, so a superseded timer can never fire.

use std::time::{Duration, Instant};

/// A single cancellable deadline.
#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    deadline: Option<Instant>,
    /// Number of times this slot has been armed (rearming included)
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot to fire `delay` after `now`, cancelling any pending deadline.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
        self.generation += 1;
    }

    /// Cancel the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the deadline if it has elapsed by `now`, without consuming it.
    pub fn due(&self, now: Instant) -> Option<Instant> {
        self.deadline.filter(|at| *at <= now)
    }

    /// Consume the deadline if it has elapsed by `now`.
    ///
    /// Returns the instant the timer was scheduled for, which callers use as
    /// the logical "now" for follow-up scheduling so late polling never
    /// accumulates drift.
    pub fn fire(&mut self, now: Instant) -> Option<Instant> {
        let at = self.due(now)?;
        self.deadline = None;
        Some(at)
    }

    /// Time left until the deadline, zero if already due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|at| at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        assert!(!slot.is_armed());

        slot.arm(t0, Duration::from_millis(600));
        assert!(slot.is_armed());
        assert_eq!(slot.fire(t0 + Duration::from_millis(599)), None);
        assert_eq!(
            slot.fire(t0 + Duration::from_millis(700)),
            Some(t0 + Duration::from_millis(600))
        );
        // One-shot
        assert!(!slot.is_armed());
        assert_eq!(slot.fire(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(t0, Duration::from_millis(2000));
        slot.arm(t0 + Duration::from_millis(1000), Duration::from_millis(2000));

        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.fire(t0 + Duration::from_millis(2000)), None);
        assert!(slot.fire(t0 + Duration::from_millis(3000)).is_some());
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(t0, Duration::from_millis(10));
        slot.cancel();
        assert_eq!(slot.fire(t0 + Duration::from_secs(1)), None);
        assert_eq!(slot.remaining(t0), None);
    }

    #[test]
    fn test_remaining_saturates() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.arm(t0, Duration::from_millis(100));
        assert_eq!(slot.remaining(t0), Some(Duration::from_millis(100)));
        assert_eq!(
            slot.remaining(t0 + Duration::from_millis(500)),
            Some(Duration::ZERO)
        );
    }
}
